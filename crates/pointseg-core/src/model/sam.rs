use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::segment_anything::sam::{self, Sam};
use image::imageops::{self, FilterType};
use image::RgbImage;
use ndarray::{Array2, ArrayView3};
use tracing::{debug, info, warn};

use crate::config::{DevicePreference, ModelConfig, SamArchitecture};
use crate::error::{PointsegError, Result};
use crate::mapping::ImagePoint;

use super::{PointLabel, Prediction, SegmentModel};

/// Features cached for the currently prepared image.
struct PreparedImage {
    embeddings: Tensor,
    width: usize,
    height: usize,
    /// Size of the image as fed to the encoder (longest side = `sam::IMAGE_SIZE`).
    resized_width: usize,
    resized_height: usize,
}

/// [Segment Anything](https://segment-anything.com/) running on candle.
pub struct SamModel {
    device: Device,
    sam: Sam,
    prepared: Option<PreparedImage>,
}

impl SamModel {
    /// Load weights from `config.checkpoint` onto the configured device.
    pub fn new(config: &ModelConfig) -> Result<Self> {
        if !config.checkpoint.is_file() {
            return Err(PointsegError::CheckpointNotFound(config.checkpoint.clone()));
        }

        let device = select_device(config.device)?;
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(
                std::slice::from_ref(&config.checkpoint),
                DType::F32,
                &device,
            )?
        };
        let sam = match &config.architecture {
            SamArchitecture::Tiny => Sam::new_tiny(vb)?,
            SamArchitecture::Vit {
                embed_dim,
                depth,
                num_heads,
                global_attn_indexes,
            } => Sam::new(*embed_dim, *depth, *num_heads, global_attn_indexes, vb)?,
        };

        info!(
            checkpoint = %config.checkpoint.display(),
            device = ?device,
            "SAM model loaded"
        );
        Ok(Self {
            device,
            sam,
            prepared: None,
        })
    }

    fn image_to_tensor(&self, image: &RgbImage) -> Result<Tensor> {
        let (height, width) = (image.height() as usize, image.width() as usize);
        let data = image.as_raw().clone();
        let tensor = Tensor::from_vec(data, (height, width, 3), &self.device)?.permute((2, 0, 1))?;
        Ok(tensor)
    }
}

impl SegmentModel for SamModel {
    fn prepare(&mut self, pixels: ArrayView3<'_, u8>) -> Result<()> {
        self.prepared = None;

        let (height, width, channels) = pixels.dim();
        if channels != 3 || width == 0 || height == 0 {
            return Err(PointsegError::InvalidDimensions {
                width: width as u32,
                height: height as u32,
            });
        }

        let raw: Vec<u8> = pixels.iter().copied().collect();
        let image = RgbImage::from_raw(width as u32, height as u32, raw).ok_or(
            PointsegError::InvalidDimensions {
                width: width as u32,
                height: height as u32,
            },
        )?;

        let (resized_width, resized_height) = encoder_size(width, height);
        let resized = imageops::resize(
            &image,
            resized_width as u32,
            resized_height as u32,
            FilterType::CatmullRom,
        );
        let tensor = self.image_to_tensor(&resized)?;
        let embeddings = self.sam.embeddings(&tensor)?;

        debug!(width, height, resized_width, resized_height, "Image embeddings computed");
        self.prepared = Some(PreparedImage {
            embeddings,
            width,
            height,
            resized_width,
            resized_height,
        });
        Ok(())
    }

    fn predict(&mut self, point: ImagePoint, label: PointLabel) -> Result<Prediction> {
        let prepared = self.prepared.as_ref().ok_or(PointsegError::ModelNotPrepared)?;

        let x = point.x as f64 / prepared.width as f64;
        let y = point.y as f64 / prepared.height as f64;
        let points = [(x, y, label.is_foreground())];

        let (low_res_mask, iou) = self.sam.forward_for_embeddings(
            &prepared.embeddings,
            prepared.resized_height,
            prepared.resized_width,
            &points,
            false,
        )?;

        // (1, 1, 256, 256) -> (h', w') over the un-padded encoder input
        let mask = low_res_mask
            .upsample_nearest2d(sam::IMAGE_SIZE, sam::IMAGE_SIZE)?
            .get(0)?
            .narrow(1, 0, prepared.resized_height)?
            .narrow(2, 0, prepared.resized_width)?
            .get(0)?
            .to_dtype(DType::F32)?;
        let values = mask.flatten_all()?.to_vec1::<f32>()?;
        let resized = Array2::from_shape_vec((prepared.resized_height, prepared.resized_width), values)
            .map_err(|e| PointsegError::Model(e.to_string()))?;

        let mask = resample_nearest(&resized, prepared.height, prepared.width);
        let scores = iou.flatten_all()?.to_dtype(DType::F32)?.to_vec1::<f32>()?;

        Ok(Prediction { mask, scores })
    }
}

/// Pick the candle device for a preference.
pub fn select_device(preference: DevicePreference) -> Result<Device> {
    match preference {
        DevicePreference::Cpu => Ok(Device::Cpu),
        DevicePreference::Cuda => Ok(Device::new_cuda(0)?),
        DevicePreference::Metal => Ok(Device::new_metal(0)?),
        DevicePreference::Auto => {
            let device = Device::cuda_if_available(0)?;
            if !device.is_cuda() {
                warn!("Running on CPU, to run on GPU, build with `--features cuda`");
            }
            Ok(device)
        }
    }
}

/// Encoder input size: longest side scaled to `sam::IMAGE_SIZE`, aspect preserved.
fn encoder_size(width: usize, height: usize) -> (usize, usize) {
    let longest = sam::IMAGE_SIZE;
    if height < width {
        (longest, ((longest * height) / width).max(1))
    } else {
        (((longest * width) / height).max(1), longest)
    }
}

/// Nearest-neighbour resample of a 2D grid to (height, width).
fn resample_nearest(src: &Array2<f32>, height: usize, width: usize) -> Array2<f32> {
    let (src_h, src_w) = src.dim();
    Array2::from_shape_fn((height, width), |(row, col)| {
        let r = (((row as f64 + 0.5) * src_h as f64 / height as f64) as usize).min(src_h - 1);
        let c = (((col as f64 + 0.5) * src_w as f64 / width as f64) as usize).min(src_w - 1);
        src[[r, c]]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoder_size_landscape() {
        assert_eq!(encoder_size(1600, 1200), (1024, 768));
    }

    #[test]
    fn test_encoder_size_portrait() {
        assert_eq!(encoder_size(600, 1200), (512, 1024));
    }

    #[test]
    fn test_encoder_size_thin_strip() {
        assert_eq!(encoder_size(5000, 1), (1024, 1));
    }

    #[test]
    fn test_resample_nearest_upscale() {
        let src = Array2::from_shape_vec((2, 2), vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let out = resample_nearest(&src, 4, 4);
        assert_eq!(out.dim(), (4, 4));
        assert_eq!(out[[0, 0]], 1.0);
        assert_eq!(out[[1, 1]], 1.0);
        assert_eq!(out[[0, 3]], 2.0);
        assert_eq!(out[[3, 0]], 3.0);
        assert_eq!(out[[3, 3]], 4.0);
    }

    #[test]
    fn test_resample_nearest_downscale() {
        let src = Array2::from_shape_fn((4, 4), |(r, _)| r as f32);
        let out = resample_nearest(&src, 2, 2);
        assert_eq!(out[[0, 0]], 1.0);
        assert_eq!(out[[1, 0]], 3.0);
    }
}
