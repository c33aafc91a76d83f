use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use smudge_core::compare::compare_trees;

#[derive(Args)]
pub struct CompareArgs {
    /// Directory of degraded frames (the input side)
    pub input: PathBuf,

    /// Directory of clean frames (the target side)
    pub target: PathBuf,

    /// List the N worst-scoring pairs by PSNR
    #[arg(long, default_value = "0")]
    pub worst: usize,
}

pub fn run(args: &CompareArgs) -> Result<()> {
    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg:20} [{bar:40}] {pos}%")?
            .progress_chars("=> "),
    );
    pb.set_message("Comparing frames");

    let report = compare_trees(&args.input, &args.target, |f| {
        pb.set_position((f * 100.0) as u64);
    })?;

    pb.finish_with_message("Done");

    crate::summary::print_compare_summary(&report, args.worst);

    Ok(())
}
