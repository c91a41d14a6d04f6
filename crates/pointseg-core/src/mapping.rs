use crate::consts::{VIEWPORT_HEIGHT, VIEWPORT_WIDTH};
use crate::error::{PointsegError, Result};

/// A position in viewport (display) space, origin at the top-left of the drawn image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplayPoint {
    pub x: f32,
    pub y: f32,
}

impl DisplayPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A pixel position in original image space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ImagePoint {
    pub x: u32,
    pub y: u32,
}

impl ImagePoint {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Uniform scale that fits an image inside the viewport without cropping.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportScale {
    pub scale: f32,
    pub image_size: [u32; 2],
    pub display_size: [u32; 2],
}

impl ViewportScale {
    /// `scale = min(vw / w, vh / h)`; the display size is the rounded scaled
    /// image size, clamped so it never exceeds the viewport.
    pub fn fit(width: u32, height: u32, viewport_width: u32, viewport_height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(PointsegError::InvalidDimensions { width, height });
        }
        if viewport_width == 0 || viewport_height == 0 {
            return Err(PointsegError::InvalidDimensions {
                width: viewport_width,
                height: viewport_height,
            });
        }

        let fit_x = viewport_width as f32 / width as f32;
        let fit_y = viewport_height as f32 / height as f32;
        let scale = fit_x.min(fit_y);

        let display_w = ((width as f32 * scale).round() as u32).clamp(1, viewport_width);
        let display_h = ((height as f32 * scale).round() as u32).clamp(1, viewport_height);

        Ok(Self {
            scale,
            image_size: [width, height],
            display_size: [display_w, display_h],
        })
    }

    /// Fit into the fixed application viewport.
    pub fn for_viewport(width: u32, height: u32) -> Result<Self> {
        Self::fit(width, height, VIEWPORT_WIDTH, VIEWPORT_HEIGHT)
    }

    /// Map a click to image pixels.
    ///
    /// Returns `None` when the click lies outside the drawn image rectangle
    /// (the letterbox margin). Rounding overshoot at the far edge is clamped.
    pub fn to_image(&self, point: DisplayPoint) -> Option<ImagePoint> {
        let [display_w, display_h] = self.display_size;
        let inside = point.x >= 0.0
            && point.y >= 0.0
            && point.x < display_w as f32
            && point.y < display_h as f32;
        if !inside {
            return None;
        }

        let [width, height] = self.image_size;
        let x = ((point.x / self.scale).round() as u32).min(width - 1);
        let y = ((point.y / self.scale).round() as u32).min(height - 1);
        Some(ImagePoint { x, y })
    }

    pub fn to_display(&self, point: ImagePoint) -> DisplayPoint {
        DisplayPoint {
            x: point.x as f32 * self.scale,
            y: point.y as f32 * self.scale,
        }
    }
}
