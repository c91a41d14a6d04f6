//! Segmentation model boundary.
//!
//! The controller only talks to [`SegmentModel`], so the concrete network
//! (or a stub in tests) can be swapped without touching UI code.

mod sam;

use ndarray::{Array2, ArrayView3};

use crate::error::Result;
use crate::mapping::ImagePoint;

pub use sam::{select_device, SamModel};

/// Whether a point prompt marks the object or the background around it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointLabel {
    Foreground,
    Background,
}

impl PointLabel {
    pub fn is_foreground(self) -> bool {
        matches!(self, PointLabel::Foreground)
    }
}

/// Output of a single point prompt.
#[derive(Clone, Debug)]
pub struct Prediction {
    /// Raw per-pixel mask values, shape = (height, width) of the prepared image.
    pub mask: Array2<f32>,
    /// Model confidence (predicted IoU) for each returned mask.
    pub scores: Vec<f32>,
}

/// A promptable segmentation model with a per-image feature cache.
pub trait SegmentModel {
    /// Compute and cache image features for `pixels` (shape = (height, width, 3)).
    ///
    /// Any features from a previous image are dropped first, even if this call fails.
    fn prepare(&mut self, pixels: ArrayView3<'_, u8>) -> Result<()>;

    /// Predict a mask for one point on the prepared image.
    ///
    /// Returns [`crate::error::PointsegError::ModelNotPrepared`] if no image is prepared.
    fn predict(&mut self, point: ImagePoint, label: PointLabel) -> Result<Prediction>;
}

impl<M: SegmentModel + ?Sized> SegmentModel for Box<M> {
    fn prepare(&mut self, pixels: ArrayView3<'_, u8>) -> Result<()> {
        (**self).prepare(pixels)
    }

    fn predict(&mut self, point: ImagePoint, label: PointLabel) -> Result<Prediction> {
        (**self).predict(point, label)
    }
}
