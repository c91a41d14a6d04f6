mod commands;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pointseg", about = "Point-prompted image segmentation")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Segment the object at one image point and save its mask
    Segment(commands::segment::SegmentArgs),
    /// Print the content fingerprint used in output names
    Fingerprint(commands::fingerprint::FingerprintArgs),
    /// Print or save the default model config descriptor
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &cli.command {
        Commands::Segment(args) => commands::segment::run(args),
        Commands::Fingerprint(args) => commands::fingerprint::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}
