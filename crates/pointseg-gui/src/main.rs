mod app;
mod convert;
mod panels;
mod state;

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use pointseg_core::config::{DevicePreference, ModelConfig, SamPreset};
use pointseg_core::consts::{DEFAULT_OUTPUT_DIR, VIEWPORT_HEIGHT, VIEWPORT_WIDTH};
use pointseg_core::controller::SegmentController;
use pointseg_core::model::{SamModel, SegmentModel};
use pointseg_core::output::OutputLayout;

#[derive(Parser)]
#[command(name = "pointseg-gui", about = "Interactive point-prompted segmentation")]
#[command(version)]
struct Cli {
    /// Image to open on startup
    image: Option<PathBuf>,

    /// SAM weights (safetensors)
    #[arg(long)]
    checkpoint: Option<PathBuf>,

    /// Model config descriptor (TOML); overrides --variant
    #[arg(long)]
    model_config: Option<PathBuf>,

    /// Architecture preset (tiny, vit-b, vit-l, vit-h)
    #[arg(long, default_value = "vit-b")]
    variant: SamPreset,

    /// Inference device (auto, cpu, cuda, metal)
    #[arg(long, default_value = "auto")]
    device: DevicePreference,

    /// Directory masks are written to
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();
    let config = ModelConfig::resolve(
        cli.checkpoint,
        cli.model_config.as_deref(),
        cli.variant,
        cli.device,
    )
    .context("Failed to resolve model config")?;

    let model: Box<dyn SegmentModel> = Box::new(
        SamModel::new(&config)
            .with_context(|| format!("Failed to load model from {}", config.checkpoint.display()))?,
    );
    let controller = SegmentController::new(model, OutputLayout::new(cli.output_dir));
    let startup_image = cli.image;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([VIEWPORT_WIDTH as f32 + 16.0, VIEWPORT_HEIGHT as f32 + 170.0])
            .with_min_inner_size([VIEWPORT_WIDTH as f32 + 16.0, VIEWPORT_HEIGHT as f32 + 170.0])
            .with_title("Point Segmentation"),
        ..Default::default()
    };

    eframe::run_native(
        "pointseg",
        options,
        Box::new(move |cc| {
            Ok(Box::new(app::PointsegApp::new(
                &cc.egui_ctx,
                controller,
                startup_image,
            )))
        }),
    )
    .map_err(|e| anyhow!("Window error: {e}"))
}
