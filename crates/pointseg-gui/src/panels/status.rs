use crate::app::PointsegApp;

pub fn show(ctx: &egui::Context, app: &mut PointsegApp) {
    egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
        ui.add_space(2.0);

        ui.horizontal(|ui| {
            if ui.button("Load Image").clicked() {
                app.open_dialog();
            }
            if ui.button("Quit").clicked() {
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
        });

        // Log area — fixed height for 4 lines, scrollable.
        let line_height = ui.text_style_height(&egui::TextStyle::Body);
        let spacing = ui.spacing().item_spacing.y;
        let log_height = line_height * 4.0 + spacing * 3.0;

        egui::ScrollArea::vertical()
            .max_height(log_height)
            .min_scrolled_height(log_height)
            .stick_to_bottom(true)
            .show(ui, |ui| {
                if app.ui_state.log_messages.is_empty() {
                    // Reserve space for 4 empty lines to prevent layout jump.
                    for _ in 0..4 {
                        ui.label("");
                    }
                } else {
                    for msg in &app.ui_state.log_messages {
                        ui.label(msg);
                    }
                }
            });

        // Status line
        ui.horizontal(|ui| {
            match app.controller.session() {
                Some(session) => {
                    ui.label(format!("{}x{}", session.width(), session.height()));
                    ui.separator();
                    ui.label(session.fingerprint().as_str());
                    ui.separator();
                }
                None => {
                    ui.label("No image");
                    ui.separator();
                }
            }
            if let Some(scale) = app.controller.display().scale() {
                ui.label(format!("Scale: {:.0}%", scale.scale * 100.0));
                ui.separator();
            }
            ui.label(format!("Output: {}", app.controller.output().dir().display()));
        });

        ui.add_space(2.0);
    });
}
