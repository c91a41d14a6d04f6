use std::path::{Path, PathBuf};

use image::RgbImage;
use tracing::{debug, info, warn};

use crate::composite::{mask_to_gray, overlay, selected_pixels};
use crate::consts::{VIEWPORT_HEIGHT, VIEWPORT_WIDTH};
use crate::display::DisplaySurface;
use crate::error::{PointsegError, Result};
use crate::mapping::{DisplayPoint, ImagePoint};
use crate::model::{PointLabel, SegmentModel};
use crate::output::{save_mask, OutputLayout};
use crate::session::ImageSession;

/// Why a click did not produce a prediction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Nothing has been loaded yet.
    NoImage,
    /// The click landed in the margin around the drawn image.
    OutsideImage,
    /// The model lost its features for the current image and could not restore them.
    ModelUnavailable,
}

/// Result of one successful point prompt.
#[derive(Clone, Debug)]
pub struct Segmentation {
    pub point: ImagePoint,
    pub label: PointLabel,
    pub mask_path: PathBuf,
    pub scores: Vec<f32>,
    pub selected_pixels: usize,
    /// Full-resolution highlight, for display only.
    pub overlay: RgbImage,
}

#[derive(Clone, Debug)]
pub enum ClickOutcome {
    Ignored(IgnoreReason),
    Segmented(Segmentation),
}

/// Wires load and click events to the model, the display and the output files.
///
/// Owns the injected model; the model is only ever asked to predict on the
/// image it was last successfully prepared with.
pub struct SegmentController<M> {
    model: M,
    model_ready: bool,
    session: Option<ImageSession>,
    display: DisplaySurface,
    output: OutputLayout,
}

impl<M: SegmentModel> SegmentController<M> {
    pub fn new(model: M, output: OutputLayout) -> Self {
        Self::with_viewport(model, output, VIEWPORT_WIDTH, VIEWPORT_HEIGHT)
    }

    pub fn with_viewport(model: M, output: OutputLayout, viewport_width: u32, viewport_height: u32) -> Self {
        Self {
            model,
            model_ready: false,
            session: None,
            display: DisplaySurface::new(viewport_width, viewport_height),
            output,
        }
    }

    /// Open an image file and make it the current session.
    ///
    /// On failure the previous session (if any) stays current.
    pub fn load(&mut self, path: &Path) -> Result<&ImageSession> {
        let session = ImageSession::open(path)?;
        self.load_session(session)
    }

    /// Make an already opened session current: prepare the model, then show it.
    pub fn load_session(&mut self, session: ImageSession) -> Result<&ImageSession> {
        if let Err(e) = self.activate(&session) {
            self.restore_previous();
            return Err(e);
        }
        self.model_ready = true;
        Ok(self.session.insert(session))
    }

    fn activate(&mut self, session: &ImageSession) -> Result<()> {
        self.model.prepare(session.pixels())?;
        self.display.show_base(session.image())
    }

    fn restore_previous(&mut self) {
        let Some(previous) = &self.session else {
            self.model_ready = false;
            return;
        };
        match self.model.prepare(previous.pixels()) {
            Ok(()) => self.model_ready = true,
            Err(e) => {
                warn!("Failed to restore features for {}: {e}", previous.path().display());
                self.model_ready = false;
            }
        }
    }

    /// Handle a click in viewport coordinates.
    pub fn click(&mut self, at: DisplayPoint) -> Result<ClickOutcome> {
        let Some(scale) = self.display.scale().copied() else {
            debug!("Click at ({}, {}) ignored: no image loaded", at.x, at.y);
            return Ok(ClickOutcome::Ignored(IgnoreReason::NoImage));
        };
        if self.session.is_none() {
            return Ok(ClickOutcome::Ignored(IgnoreReason::NoImage));
        }
        if !self.model_ready {
            debug!("Click ignored: model has no prepared image");
            return Ok(ClickOutcome::Ignored(IgnoreReason::ModelUnavailable));
        }
        let Some(point) = scale.to_image(at) else {
            debug!("Click at ({}, {}) ignored: outside drawn image", at.x, at.y);
            return Ok(ClickOutcome::Ignored(IgnoreReason::OutsideImage));
        };

        self.segment_at(point, PointLabel::Foreground)
            .map(ClickOutcome::Segmented)
    }

    /// Predict, save and display the mask for an image-space point.
    pub fn segment_at(&mut self, point: ImagePoint, label: PointLabel) -> Result<Segmentation> {
        let session = self.session.as_ref().ok_or(PointsegError::NoImageLoaded)?;
        if !self.model_ready {
            return Err(PointsegError::ModelNotPrepared);
        }

        let (width, height) = (session.width(), session.height());
        if point.x >= width || point.y >= height {
            return Err(PointsegError::PointOutOfBounds {
                x: point.x,
                y: point.y,
                width,
                height,
            });
        }

        let prediction = self.model.predict(point, label)?;
        if prediction.mask.dim() != (height as usize, width as usize) {
            let (h, w) = prediction.mask.dim();
            return Err(PointsegError::InvalidDimensions {
                width: w as u32,
                height: h as u32,
            });
        }

        let mask = mask_to_gray(&prediction.mask);
        let mask_path = self
            .output
            .mask_path(session.name(), session.fingerprint(), point);
        save_mask(&mask, &mask_path)?;

        let overlay = overlay(session.image(), &mask)?;
        self.display.show_overlay(&overlay)?;

        let selected = selected_pixels(&mask);
        info!(
            x = point.x,
            y = point.y,
            selected,
            scores = ?prediction.scores,
            "Segmented"
        );

        Ok(Segmentation {
            point,
            label,
            mask_path,
            scores: prediction.scores,
            selected_pixels: selected,
            overlay,
        })
    }

    pub fn session(&self) -> Option<&ImageSession> {
        self.session.as_ref()
    }

    pub fn display(&self) -> &DisplaySurface {
        &self.display
    }

    pub fn output(&self) -> &OutputLayout {
        &self.output
    }

    pub fn model(&self) -> &M {
        &self.model
    }
}
