use image::imageops::{self, FilterType};
use image::RgbImage;

use crate::error::{PointsegError, Result};
use crate::mapping::ViewportScale;

/// Which raster is currently drawn in the viewport.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DisplayContent {
    Base,
    Overlay,
}

#[derive(Clone, Debug)]
enum SurfaceState {
    Empty,
    Loaded {
        scale: ViewportScale,
        content: DisplayContent,
        /// Raster already resized to `scale.display_size`.
        frame: RgbImage,
    },
}

/// Fixed-size viewport content: either empty or a fitted image.
///
/// Once loaded it never returns to empty; new content only replaces the frame.
#[derive(Clone, Debug)]
pub struct DisplaySurface {
    state: SurfaceState,
    viewport: [u32; 2],
    revision: u64,
}

impl DisplaySurface {
    pub fn new(viewport_width: u32, viewport_height: u32) -> Self {
        Self {
            state: SurfaceState::Empty,
            viewport: [viewport_width, viewport_height],
            revision: 0,
        }
    }

    /// Show a freshly loaded image, recomputing the scale from its size.
    pub fn show_base(&mut self, image: &RgbImage) -> Result<()> {
        let scale = ViewportScale::fit(image.width(), image.height(), self.viewport[0], self.viewport[1])?;
        let frame = fit_frame(image, &scale);
        self.state = SurfaceState::Loaded {
            scale,
            content: DisplayContent::Base,
            frame,
        };
        self.revision += 1;
        Ok(())
    }

    /// Swap the drawn frame for a prediction overlay of the loaded image.
    pub fn show_overlay(&mut self, overlay: &RgbImage) -> Result<()> {
        let SurfaceState::Loaded {
            scale,
            content,
            frame,
        } = &mut self.state
        else {
            return Err(PointsegError::NoImageLoaded);
        };

        let [width, height] = scale.image_size;
        if overlay.dimensions() != (width, height) {
            let (width, height) = overlay.dimensions();
            return Err(PointsegError::InvalidDimensions { width, height });
        }

        *frame = fit_frame(overlay, scale);
        *content = DisplayContent::Overlay;
        self.revision += 1;
        Ok(())
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.state, SurfaceState::Loaded { .. })
    }

    pub fn scale(&self) -> Option<&ViewportScale> {
        match &self.state {
            SurfaceState::Loaded { scale, .. } => Some(scale),
            SurfaceState::Empty => None,
        }
    }

    pub fn frame(&self) -> Option<&RgbImage> {
        match &self.state {
            SurfaceState::Loaded { frame, .. } => Some(frame),
            SurfaceState::Empty => None,
        }
    }

    pub fn content(&self) -> Option<DisplayContent> {
        match &self.state {
            SurfaceState::Loaded { content, .. } => Some(*content),
            SurfaceState::Empty => None,
        }
    }

    pub fn viewport(&self) -> [u32; 2] {
        self.viewport
    }

    /// Bumped on every content change so renderers can skip re-uploads.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

fn fit_frame(image: &RgbImage, scale: &ViewportScale) -> RgbImage {
    let [w, h] = scale.display_size;
    if image.dimensions() == (w, h) {
        return image.clone();
    }
    imageops::resize(image, w, h, FilterType::Lanczos3)
}
