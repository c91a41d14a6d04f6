use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use pointseg_core::fingerprint::Fingerprint;

#[derive(Args)]
pub struct FingerprintArgs {
    /// Files to fingerprint
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

pub fn run(args: &FingerprintArgs) -> Result<()> {
    for file in &args.files {
        let fp = Fingerprint::of_file(file)
            .with_context(|| format!("Failed to read {}", file.display()))?;
        println!("{fp}  {}", file.display());
    }
    Ok(())
}
