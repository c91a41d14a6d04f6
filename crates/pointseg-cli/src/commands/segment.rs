use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use pointseg_core::consts::DEFAULT_OUTPUT_DIR;
use pointseg_core::controller::SegmentController;
use pointseg_core::mapping::ImagePoint;
use pointseg_core::model::{PointLabel, SamModel};
use pointseg_core::output::OutputLayout;

use super::ModelArgs;

#[derive(Args)]
pub struct SegmentArgs {
    /// Input image file
    pub file: PathBuf,

    /// Point x coordinate in image pixels
    #[arg(long)]
    pub x: u32,

    /// Point y coordinate in image pixels
    #[arg(long)]
    pub y: u32,

    /// Treat the point as background instead of foreground
    #[arg(long)]
    pub background: bool,

    /// Also save the highlighted overlay to this path
    #[arg(long)]
    pub overlay: Option<PathBuf>,

    /// Directory masks are written to
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    #[command(flatten)]
    pub model: ModelArgs,
}

pub fn run(args: &SegmentArgs) -> Result<()> {
    let config = args.model.to_config()?;
    tracing::debug!(?config, "Resolved model config");
    let point = ImagePoint::new(args.x, args.y);
    let label = if args.background {
        PointLabel::Background
    } else {
        PointLabel::Foreground
    };

    crate::summary::print_segment_summary(&args.file, point, label, &config, &args.output_dir);

    let pb = spinner("Loading model")?;
    let model = SamModel::new(&config)
        .with_context(|| format!("Failed to load model from {}", config.checkpoint.display()))?;
    pb.finish_with_message("Model loaded");

    let mut controller = SegmentController::new(model, OutputLayout::new(&args.output_dir));

    let pb = spinner("Computing image embeddings")?;
    let session = controller
        .load(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;
    let (width, height) = (session.width(), session.height());
    pb.finish_with_message(format!("Embedded {width}x{height} image"));

    let pb = spinner("Predicting mask")?;
    let segmentation = controller.segment_at(point, label)?;
    pb.finish_and_clear();

    if let Some(ref path) = args.overlay {
        segmentation
            .overlay
            .save(path)
            .with_context(|| format!("Failed to save overlay to {}", path.display()))?;
        println!("Overlay saved to {}", path.display());
    }

    crate::summary::print_segment_result(&segmentation);
    Ok(())
}

fn spinner(message: &'static str) -> Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner} {msg} [{elapsed}]")?);
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}
