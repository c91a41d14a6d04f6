use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PointsegError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Model error: {0}")]
    Model(String),

    #[error("Model has no prepared image")]
    ModelNotPrepared,

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Point {x},{y} outside {width}x{height} image")]
    PointOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    #[error("No image loaded")]
    NoImageLoaded,

    #[error("Checkpoint not found: {}", .0.display())]
    CheckpointNotFound(PathBuf),

    #[error("Invalid model config: {0}")]
    Config(String),
}

impl From<candle_core::Error> for PointsegError {
    fn from(e: candle_core::Error) -> Self {
        PointsegError::Model(e.to_string())
    }
}

impl From<toml::de::Error> for PointsegError {
    fn from(e: toml::de::Error) -> Self {
        PointsegError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PointsegError>;
