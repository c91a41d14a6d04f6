use std::path::{Path, PathBuf};

use pointseg_core::controller::{ClickOutcome, IgnoreReason, SegmentController};
use pointseg_core::display::DisplayContent;
use pointseg_core::mapping::DisplayPoint;
use pointseg_core::model::SegmentModel;

use crate::convert::rgb_to_color_image;
use crate::panels;
use crate::state::{UIState, ViewportState};

pub struct PointsegApp {
    pub controller: SegmentController<Box<dyn SegmentModel>>,
    pub ui_state: UIState,
    pub viewport: ViewportState,
}

impl PointsegApp {
    pub fn new(
        ctx: &egui::Context,
        controller: SegmentController<Box<dyn SegmentModel>>,
        startup_image: Option<PathBuf>,
    ) -> Self {
        let mut app = Self {
            controller,
            ui_state: UIState::default(),
            viewport: ViewportState::default(),
        };
        if let Some(path) = startup_image {
            app.load_image(&path);
            app.sync_texture(ctx);
        }
        app
    }

    /// Ask for a file and load it. Closing the dialog does nothing.
    pub fn open_dialog(&mut self) {
        let picked = rfd::FileDialog::new()
            .set_title("Select Image")
            .add_filter(
                "Images",
                &["png", "jpg", "jpeg", "bmp", "gif", "tif", "tiff", "webp"],
            )
            .add_filter("All files", &["*"])
            .pick_file();
        if let Some(path) = picked {
            self.load_image(&path);
        }
    }

    pub fn load_image(&mut self, path: &Path) {
        match self.controller.load(path) {
            Ok(session) => {
                let msg = format!(
                    "Opened: {} ({}x{}, {})",
                    path.display(),
                    session.width(),
                    session.height(),
                    session.fingerprint()
                );
                self.ui_state.add_log(msg);
            }
            Err(e) => {
                tracing::error!("Failed to load {}: {e}", path.display());
                self.ui_state
                    .add_log(format!("ERROR: Failed to load {}: {e}", path.display()));
            }
        }
    }

    pub fn handle_click(&mut self, at: DisplayPoint) {
        match self.controller.click(at) {
            Ok(ClickOutcome::Segmented(seg)) => {
                self.ui_state
                    .add_log(format!("Saved: {}", seg.mask_path.display()));
            }
            Ok(ClickOutcome::Ignored(IgnoreReason::OutsideImage)) => {
                self.ui_state.add_log("Click outside image ignored".into());
            }
            Ok(ClickOutcome::Ignored(IgnoreReason::ModelUnavailable)) => {
                self.ui_state
                    .add_log("ERROR: Model has no features for this image, load it again".into());
            }
            Ok(ClickOutcome::Ignored(IgnoreReason::NoImage)) => {}
            Err(e) => {
                tracing::error!("Segmentation failed: {e}");
                self.ui_state.add_log(format!("ERROR: Segmentation failed: {e}"));
            }
        }
    }

    /// Re-upload the viewport texture when the display surface changed.
    pub fn sync_texture(&mut self, ctx: &egui::Context) {
        let display = self.controller.display();
        if self.viewport.revision == Some(display.revision()) {
            return;
        }
        if let Some(frame) = display.frame() {
            let image = rgb_to_color_image(frame);
            self.viewport.texture =
                Some(ctx.load_texture("viewport", image, egui::TextureOptions::LINEAR));
            ctx.request_repaint();
        }
        self.viewport.revision = Some(display.revision());
    }

    pub fn viewing_label(&self) -> &'static str {
        match self.controller.display().content() {
            Some(DisplayContent::Base) => "Image",
            Some(DisplayContent::Overlay) => "Mask Overlay",
            None => "",
        }
    }
}

impl eframe::App for PointsegApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        panels::menu_bar::show(ctx, self);
        panels::status::show(ctx, self);
        panels::viewport::show(ctx, self);
        self.sync_texture(ctx);

        if self.ui_state.show_about {
            egui::Window::new("About")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("Point Segmentation");
                        ui.label("Click an object to segment it");
                        ui.add_space(8.0);
                        ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                        ui.add_space(8.0);
                        if ui.button("Close").clicked() {
                            self.ui_state.show_about = false;
                        }
                    });
                });
        }
    }
}
