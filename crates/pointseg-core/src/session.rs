use std::path::{Path, PathBuf};

use image::RgbImage;
use ndarray::{Array3, ArrayView3};
use tracing::info;

use crate::error::{PointsegError, Result};
use crate::fingerprint::Fingerprint;

/// Everything known about the currently loaded image.
///
/// A session is never mutated after it is opened; loading another image
/// builds a fresh session and drops this one.
#[derive(Clone, Debug)]
pub struct ImageSession {
    path: PathBuf,
    name: String,
    image: RgbImage,
    /// Same raster as `image`, shape = (height, width, 3).
    pixels: Array3<u8>,
    fingerprint: Fingerprint,
}

impl ImageSession {
    /// Read, decode and fingerprint an image file.
    ///
    /// The file is read once so the fingerprint always matches the decoded pixels.
    pub fn open(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let fingerprint = Fingerprint::of_bytes(&bytes);
        let image = image::load_from_memory(&bytes)?.to_rgb8();
        let session = Self::from_parts(path, image, fingerprint)?;

        info!(
            path = %path.display(),
            width = session.width(),
            height = session.height(),
            fingerprint = %session.fingerprint,
            "Image loaded"
        );
        Ok(session)
    }

    /// Build a session from an already decoded image.
    pub fn from_parts(path: &Path, image: RgbImage, fingerprint: Fingerprint) -> Result<Self> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(PointsegError::InvalidDimensions { width, height });
        }

        let pixels = Array3::from_shape_vec(
            (height as usize, width as usize, 3),
            image.as_raw().clone(),
        )
        .map_err(|_| PointsegError::InvalidDimensions { width, height })?;

        Ok(Self {
            path: path.to_path_buf(),
            name: base_name(path),
            image,
            pixels,
            fingerprint,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name without extension, used as the output name prefix.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn pixels(&self) -> ArrayView3<'_, u8> {
        self.pixels.view()
    }

    pub fn fingerprint(&self) -> &Fingerprint {
        &self.fingerprint
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// File name up to its first `.`, so `photo.tar.png` becomes `photo`.
/// Falls back to the file stem when that would leave nothing (`.hidden`).
pub fn base_name(path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    match file_name.split('.').next() {
        Some(head) if !head.is_empty() => head.to_string(),
        _ => path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default(),
    }
}
