pub mod config;
pub mod fingerprint;
pub mod segment;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use pointseg_core::config::{DevicePreference, ModelConfig, SamPreset};

/// Options shared by every command that loads the model.
#[derive(Args)]
pub struct ModelArgs {
    /// SAM weights (safetensors)
    #[arg(long)]
    pub checkpoint: Option<PathBuf>,

    /// Model config descriptor (TOML); overrides --variant
    #[arg(long)]
    pub model_config: Option<PathBuf>,

    /// Architecture preset (tiny, vit-b, vit-l, vit-h)
    #[arg(long, default_value = "vit-b")]
    pub variant: SamPreset,

    /// Inference device (auto, cpu, cuda, metal)
    #[arg(long, default_value = "auto")]
    pub device: DevicePreference,
}

impl ModelArgs {
    pub fn to_config(&self) -> Result<ModelConfig> {
        ModelConfig::resolve(
            self.checkpoint.clone(),
            self.model_config.as_deref(),
            self.variant,
            self.device,
        )
        .context("Failed to resolve model config")
    }
}
