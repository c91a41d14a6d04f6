use image::{GrayImage, Luma, Rgb, RgbImage};
use ndarray::Array2;

use crate::consts::{MASK_THRESHOLD, OVERLAY_ALPHA, OVERLAY_COLOR};
use crate::error::{PointsegError, Result};

/// Rasterize a raw model mask as 0/255 grayscale at full resolution.
///
/// Values above [`MASK_THRESHOLD`] become 255, everything else (including NaN) 0.
pub fn mask_to_gray(mask: &Array2<f32>) -> GrayImage {
    let (h, w) = mask.dim();
    let mut img = GrayImage::new(w as u32, h as u32);
    for ((row, col), &value) in mask.indexed_iter() {
        let selected = value.is_finite() && value > MASK_THRESHOLD;
        img.put_pixel(col as u32, row as u32, Luma([if selected { 255 } else { 0 }]));
    }
    img
}

/// Count of selected pixels in a 0/255 mask.
pub fn selected_pixels(mask: &GrayImage) -> usize {
    mask.pixels().filter(|p| p.0[0] != 0).count()
}

/// Translucent highlight of the masked region for display.
///
/// Selected pixels are replaced with [`OVERLAY_COLOR`], then the result is
/// blended with the original at [`OVERLAY_ALPHA`].
pub fn overlay(image: &RgbImage, mask: &GrayImage) -> Result<RgbImage> {
    if image.dimensions() != mask.dimensions() {
        let (width, height) = mask.dimensions();
        return Err(PointsegError::InvalidDimensions { width, height });
    }

    let mut out = image.clone();
    for (x, y, pixel) in out.enumerate_pixels_mut() {
        if mask.get_pixel(x, y).0[0] == 0 {
            continue;
        }
        let mut blended = [0u8; 3];
        for (c, value) in blended.iter_mut().enumerate() {
            let original = pixel.0[c] as f32;
            let colored = OVERLAY_COLOR[c] as f32;
            *value = (original + (colored - original) * OVERLAY_ALPHA)
                .round()
                .clamp(0.0, 255.0) as u8;
        }
        *pixel = Rgb(blended);
    }
    Ok(out)
}
