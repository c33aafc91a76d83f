use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use smudge_core::config::{DatasetConfig, DegradeParams, ExtractParams, ParamRange};
use smudge_core::corpus::{degrade_frame_tree, resolve_seed, LOG_FILE_NAME};

use super::{resolve_categories, ModeArg};

#[derive(Args)]
pub struct DegradeArgs {
    /// Directory of clean frame folders (the target side)
    pub target: PathBuf,

    /// Directory receiving degraded frames (the input side)
    #[arg(short, long)]
    pub output: PathBuf,

    /// Degradation mode, fixed per frame directory
    #[arg(long, value_enum, default_value = "random")]
    pub mode: ModeArg,

    /// Gaussian blur sigma range
    #[arg(long, default_value = "2..5")]
    pub sigma: ParamRange<f32>,

    /// JPEG quality range for the compression round-trip
    #[arg(long, default_value = "5..25")]
    pub quality: ParamRange<u8>,

    /// Brightness factor range
    #[arg(long, default_value = "0.3..1.8")]
    pub brightness: ParamRange<f32>,

    /// Contrast factor range
    #[arg(long, default_value = "0.3..1.8")]
    pub contrast: ParamRange<f32>,

    /// Block-noise patch count range
    #[arg(long, default_value = "5..20")]
    pub patch_count: ParamRange<usize>,

    /// Block-noise patch side range, in pixels
    #[arg(long, default_value = "10..50")]
    pub patch_size: ParamRange<usize>,

    /// RNG seed for a reproducible run
    #[arg(long)]
    pub seed: Option<u64>,

    /// Comma-separated category subdirectories to process
    #[arg(long, value_delimiter = ',')]
    pub categories: Option<Vec<String>>,

    /// Log file path (default: <output>/degradation_log.txt)
    #[arg(long)]
    pub log: Option<PathBuf>,
}

pub fn run(args: &DegradeArgs) -> Result<()> {
    let config = build_config(args);
    let seed = resolve_seed(args.seed);

    crate::summary::print_degrade_summary(&config, seed, "Frame Degradation");

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg:20} [{bar:40}] {pos}%")?
            .progress_chars("=> "),
    );
    pb.set_message("Degrading frames");

    let log = degrade_frame_tree(&config, seed, |f| {
        pb.set_position((f * 100.0) as u64);
    })?;

    pb.finish_with_message("Done");

    let log_path = args
        .log
        .clone()
        .unwrap_or_else(|| args.output.join(LOG_FILE_NAME));
    log.save(&log_path)
        .with_context(|| format!("Failed to write log {}", log_path.display()))?;

    println!(
        "\nDegraded {} frames, log saved to {}",
        log.len(),
        log_path.display()
    );

    Ok(())
}

fn build_config(args: &DegradeArgs) -> DatasetConfig {
    DatasetConfig {
        target_root: args.target.clone(),
        input_root: args.output.clone(),
        categories: resolve_categories(&args.categories),
        seed: args.seed,
        extract: ExtractParams::default(),
        degrade: DegradeParams {
            mode: args.mode.to_mode(),
            sigma: args.sigma,
            quality: args.quality,
            brightness: args.brightness,
            contrast: args.contrast,
            patch_count: args.patch_count,
            patch_size: args.patch_size,
        },
    }
}
