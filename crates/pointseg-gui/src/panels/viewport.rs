use pointseg_core::mapping::DisplayPoint;

use crate::app::PointsegApp;

pub fn show(ctx: &egui::Context, app: &mut PointsegApp) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let [vw, vh] = app.controller.display().viewport();
        let (rect, response) =
            ui.allocate_exact_size(egui::vec2(vw as f32, vh as f32), egui::Sense::click());
        paint_background(ui, rect);

        let texture_info = app
            .viewport
            .texture
            .as_ref()
            .map(|t| (t.id(), t.size_vec2()));

        match texture_info {
            Some((texture_id, size)) if app.controller.display().is_loaded() => {
                // Anchored top-left, like the click coordinates.
                let img_rect = egui::Rect::from_min_size(rect.min, size);
                draw_image(ui, texture_id, img_rect);
                draw_viewing_label(ui, rect, app.viewing_label());
            }
            _ => show_placeholder(ui, rect),
        }

        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                let local = pos - rect.min;
                app.handle_click(DisplayPoint::new(local.x, local.y));
            }
        }
    });
}

fn paint_background(ui: &egui::Ui, rect: egui::Rect) {
    ui.painter()
        .rect_filled(rect, 0.0, egui::Color32::from_gray(128));
}

fn draw_image(ui: &egui::Ui, texture_id: egui::TextureId, img_rect: egui::Rect) {
    ui.painter().image(
        texture_id,
        img_rect,
        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
        egui::Color32::WHITE,
    );
}

fn draw_viewing_label(ui: &egui::Ui, rect: egui::Rect, label: &str) {
    if label.is_empty() {
        return;
    }
    let label_pos = rect.right_top() + egui::vec2(-8.0, 8.0);
    ui.painter().text(
        label_pos,
        egui::Align2::RIGHT_TOP,
        label,
        egui::FontId::proportional(14.0),
        egui::Color32::from_white_alpha(200),
    );
}

fn show_placeholder(ui: &egui::Ui, rect: egui::Rect) {
    ui.painter().text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        "Load an image to begin",
        egui::FontId::proportional(18.0),
        egui::Color32::from_gray(60),
    );
}
