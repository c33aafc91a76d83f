use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use smudge_core::config::ExtractParams;
use smudge_core::corpus::extract_tree;

use super::resolve_categories;

#[derive(Args)]
pub struct ExtractArgs {
    /// Directory of source videos, one subdirectory per category
    pub source: PathBuf,

    /// Directory receiving the extracted frame folders
    #[arg(short, long)]
    pub output: PathBuf,

    /// Target sampling rate in frames per second
    #[arg(long, default_value = "5")]
    pub fps: f64,

    /// Keep every decoded frame instead of sampling
    #[arg(long)]
    pub every_frame: bool,

    /// Comma-separated category subdirectories to process
    #[arg(long, value_delimiter = ',')]
    pub categories: Option<Vec<String>>,
}

pub fn run(args: &ExtractArgs) -> Result<()> {
    let params = ExtractParams {
        fps: args.fps,
        every_frame: args.every_frame,
    };
    let categories = resolve_categories(&args.categories);

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg:20} [{bar:40}] {pos}%")?
            .progress_chars("=> "),
    );
    pb.set_message("Extracting frames");

    let total = extract_tree(&args.source, &args.output, &categories, &params, |f| {
        pb.set_position((f * 100.0) as u64);
    })?;

    pb.finish_with_message("Done");
    println!("\nExtracted {} frames to {}", total, args.output.display());

    Ok(())
}
