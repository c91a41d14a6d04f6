use std::path::{Path, PathBuf};

use image::{GrayImage, ImageFormat};
use tracing::info;

use crate::consts::DEFAULT_OUTPUT_DIR;
use crate::error::Result;
use crate::fingerprint::Fingerprint;
use crate::mapping::ImagePoint;

/// Where and under which name predicted masks are written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputLayout {
    dir: PathBuf,
}

impl Default for OutputLayout {
    fn default() -> Self {
        Self::new(DEFAULT_OUTPUT_DIR)
    }
}

impl OutputLayout {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `<dir>/<name>-<fingerprint>-<x>x<y>-mask.png`
    pub fn mask_path(&self, name: &str, fingerprint: &Fingerprint, point: ImagePoint) -> PathBuf {
        self.dir
            .join(format!("{name}-{fingerprint}-{}x{}-mask.png", point.x, point.y))
    }
}

/// Write a mask as PNG, creating the parent directory if needed.
/// An existing file at `path` is overwritten.
pub fn save_mask(mask: &GrayImage, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    mask.save_with_format(path, ImageFormat::Png)?;
    info!("Saved: {}", path.display());
    Ok(())
}
