use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_CHECKPOINT;
use crate::error::{PointsegError, Result};

/// Where model inference should run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DevicePreference {
    #[default]
    Auto,
    Cpu,
    Cuda,
    Metal,
}

impl fmt::Display for DevicePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => write!(f, "Auto"),
            Self::Cpu => write!(f, "CPU"),
            Self::Cuda => write!(f, "CUDA"),
            Self::Metal => write!(f, "Metal"),
        }
    }
}

impl FromStr for DevicePreference {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "cpu" => Ok(Self::Cpu),
            "cuda" | "gpu" => Ok(Self::Cuda),
            "metal" => Ok(Self::Metal),
            other => Err(format!("unknown device '{other}' (expected auto, cpu, cuda or metal)")),
        }
    }
}

/// Image encoder layout of a SAM checkpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SamArchitecture {
    /// MobileSAM TinyViT encoder.
    Tiny,
    /// Standard ViT encoder.
    Vit {
        embed_dim: usize,
        depth: usize,
        num_heads: usize,
        global_attn_indexes: Vec<usize>,
    },
}

impl SamArchitecture {
    pub fn vit_b() -> Self {
        Self::Vit {
            embed_dim: 768,
            depth: 12,
            num_heads: 12,
            global_attn_indexes: vec![2, 5, 8, 11],
        }
    }

    pub fn vit_l() -> Self {
        Self::Vit {
            embed_dim: 1024,
            depth: 24,
            num_heads: 16,
            global_attn_indexes: vec![5, 11, 17, 23],
        }
    }

    pub fn vit_h() -> Self {
        Self::Vit {
            embed_dim: 1280,
            depth: 32,
            num_heads: 16,
            global_attn_indexes: vec![7, 15, 23, 31],
        }
    }
}

impl Default for SamArchitecture {
    fn default() -> Self {
        Self::vit_b()
    }
}

/// Named architecture presets selectable from the command line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SamPreset {
    Tiny,
    #[default]
    VitB,
    VitL,
    VitH,
}

impl SamPreset {
    pub fn architecture(self) -> SamArchitecture {
        match self {
            Self::Tiny => SamArchitecture::Tiny,
            Self::VitB => SamArchitecture::vit_b(),
            Self::VitL => SamArchitecture::vit_l(),
            Self::VitH => SamArchitecture::vit_h(),
        }
    }
}

impl FromStr for SamPreset {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "tiny" => Ok(Self::Tiny),
            "vit-b" => Ok(Self::VitB),
            "vit-l" => Ok(Self::VitL),
            "vit-h" => Ok(Self::VitH),
            other => Err(format!("unknown variant '{other}' (expected tiny, vit-b, vit-l or vit-h)")),
        }
    }
}

/// Model config descriptor file, stored as TOML.
///
/// ```toml
/// [architecture]
/// kind = "vit"
/// embed_dim = 768
/// depth = 12
/// num_heads = 12
/// global_attn_indexes = [2, 5, 8, 11]
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    pub architecture: SamArchitecture,
}

impl ModelDescriptor {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| PointsegError::Config(e.to_string()))
    }
}

/// Everything the segmentation model needs at construction time.
#[derive(Clone, Debug, PartialEq)]
pub struct ModelConfig {
    /// SAM weights in safetensors format.
    pub checkpoint: PathBuf,
    pub architecture: SamArchitecture,
    pub device: DevicePreference,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            checkpoint: PathBuf::from(DEFAULT_CHECKPOINT),
            architecture: SamArchitecture::default(),
            device: DevicePreference::default(),
        }
    }
}

impl ModelConfig {
    /// Resolve startup options. A descriptor file, when given, overrides the preset.
    pub fn resolve(
        checkpoint: Option<PathBuf>,
        descriptor: Option<&Path>,
        preset: SamPreset,
        device: DevicePreference,
    ) -> Result<Self> {
        let architecture = match descriptor {
            Some(path) => ModelDescriptor::load(path)?.architecture,
            None => preset.architecture(),
        };
        Ok(Self {
            checkpoint: checkpoint.unwrap_or_else(|| PathBuf::from(DEFAULT_CHECKPOINT)),
            architecture,
            device,
        })
    }
}
