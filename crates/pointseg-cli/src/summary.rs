use std::path::Path;

use console::Style;
use pointseg_core::config::{ModelConfig, SamArchitecture};
use pointseg_core::controller::Segmentation;
use pointseg_core::mapping::ImagePoint;
use pointseg_core::model::PointLabel;

struct Styles {
    title: Style,
    label: Style,
    value: Style,
    method: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            path: Style::new().underlined(),
        }
    }
}

fn architecture_name(architecture: &SamArchitecture) -> String {
    match architecture {
        SamArchitecture::Tiny => "Tiny (MobileSAM)".to_string(),
        SamArchitecture::Vit {
            embed_dim, depth, ..
        } => format!("ViT (dim {embed_dim}, depth {depth})"),
    }
}

pub fn print_segment_summary(
    input: &Path,
    point: ImagePoint,
    label: PointLabel,
    config: &ModelConfig,
    output_dir: &Path,
) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Point Segmentation"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(18)));
    println!();
    println!("  {:<14}{}", s.label.apply_to("Input"), s.path.apply_to(input.display()));
    println!(
        "  {:<14}{}",
        s.label.apply_to("Point"),
        s.value.apply_to(format!("{}x{} ({label:?})", point.x, point.y))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Model"),
        s.method.apply_to(architecture_name(&config.architecture))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Checkpoint"),
        s.path.apply_to(config.checkpoint.display())
    );
    println!("  {:<14}{}", s.label.apply_to("Device"), s.method.apply_to(config.device));
    println!(
        "  {:<14}{}",
        s.label.apply_to("Output"),
        s.path.apply_to(output_dir.display())
    );
    println!();
}

pub fn print_segment_result(segmentation: &Segmentation) {
    let s = Styles::new();

    let score = segmentation
        .scores
        .first()
        .map(|v| format!("{v:.3}"))
        .unwrap_or_else(|| "n/a".into());

    println!(
        "  {:<14}{}",
        s.label.apply_to("Selected"),
        s.value.apply_to(format!("{} px", segmentation.selected_pixels))
    );
    println!("  {:<14}{}", s.label.apply_to("IoU score"), s.value.apply_to(score));
    println!("Saved: {}", segmentation.mask_path.display());
}
