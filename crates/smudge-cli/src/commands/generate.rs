use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use smudge_core::config::{DatasetConfig, DegradeParams, ExtractParams, ParamRange};
use smudge_core::corpus::{generate_dataset, resolve_seed, LOG_FILE_NAME};

use super::{resolve_categories, ModeArg};

#[derive(Args)]
pub struct GenerateArgs {
    /// Directory of raw videos, organized by category
    pub source: PathBuf,

    /// Dataset config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory receiving clean frames (the target side)
    #[arg(long, default_value = "target")]
    pub target: PathBuf,

    /// Directory receiving degraded frames (the input side)
    #[arg(short, long, default_value = "input")]
    pub output: PathBuf,

    /// Frames per second to keep during extraction
    #[arg(long, default_value = "5")]
    pub fps: f64,

    /// Keep every decoded frame instead of sampling
    #[arg(long)]
    pub every_frame: bool,

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

    /// Log file path (default: <input root>/degradation_log.txt)
    #[arg(long)]
    pub log: Option<PathBuf>,
}

pub fn run(args: &GenerateArgs) -> Result<()> {
    let config = if let Some(ref config_path) = args.config {
        let contents = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config {}", config_path.display()))?;
        toml::from_str(&contents).context("Invalid dataset config")?
    } else {
        build_config_from_args(args)
    };
    let seed = resolve_seed(config.seed);

    crate::summary::print_generate_summary(&config, &args.source, seed);

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg:20} [{bar:40}] {pos}%")?
            .progress_chars("=> "),
    );

    let log = generate_dataset(&args.source, &config, seed, |stage, progress| {
        pb.set_message(stage.to_string());
        pb.set_position((progress * 100.0) as u64);
    })?;

    pb.finish_with_message("Done");

    let log_path = args
        .log
        .clone()
        .unwrap_or_else(|| config.input_root.join(LOG_FILE_NAME));
    log.save(&log_path)
        .with_context(|| format!("Failed to write log {}", log_path.display()))?;

    println!(
        "\nDegraded {} frames, log saved to {}",
        log.len(),
        log_path.display()
    );

    Ok(())
}

fn build_config_from_args(args: &GenerateArgs) -> DatasetConfig {
    DatasetConfig {
        target_root: args.target.clone(),
        input_root: args.output.clone(),
        categories: resolve_categories(&args.categories),
        seed: args.seed,
        extract: ExtractParams {
            fps: args.fps,
            every_frame: args.every_frame,
        },
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
