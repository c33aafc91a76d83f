mod psnr;
mod ssim;

pub use psnr::psnr;
pub use ssim::ssim;

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::error::{Result, SmudgeError};
use crate::frame::Frame;
use crate::io::image_io::load_image;

/// Scores for one input/target pair.
#[derive(Clone, Debug, Serialize)]
pub struct PairScore {
    pub rel_path: PathBuf,
    pub psnr: f64,
    pub ssim: f64,
}

/// Collected scores for a comparison run.
#[derive(Clone, Debug, Default, Serialize)]
pub struct CompareReport {
    pub pairs: Vec<PairScore>,
    /// Pairs excluded for a missing counterpart, an unreadable side, or a
    /// dimension mismatch. They never contribute to the means.
    pub skipped: usize,
}

impl CompareReport {
    /// Mean PSNR over the scored pairs; `None` when nothing was scored.
    pub fn mean_psnr(&self) -> Option<f64> {
        mean(self.pairs.iter().map(|p| p.psnr))
    }

    /// Mean SSIM over the scored pairs; `None` when nothing was scored.
    pub fn mean_ssim(&self) -> Option<f64> {
        mean(self.pairs.iter().map(|p| p.ssim))
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let mut sum = 0.0;
    let mut count = 0usize;
    for v in values {
        sum += v;
        count += 1;
    }
    (count > 0).then(|| sum / count as f64)
}

/// Score one pair. `None` when the spatial dimensions differ.
pub fn compare_frames(input: &Frame, target: &Frame) -> Option<(f64, f64)> {
    if !input.dims_match(target) {
        return None;
    }
    Some((psnr(input, target), ssim(input, target)))
}

/// Compare every PNG under `input_root` against the file at the same
/// relative path under `target_root`.
///
/// `on_progress` receives the completed fraction after each pair.
pub fn compare_trees(
    input_root: &Path,
    target_root: &Path,
    on_progress: impl Fn(f32) + Send + Sync,
) -> Result<CompareReport> {
    if !input_root.is_dir() {
        return Err(SmudgeError::Config(format!(
            "input root {} is not a directory",
            input_root.display()
        )));
    }

    let mut inputs: Vec<PathBuf> = WalkDir::new(input_root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("png"))
        .collect();
    inputs.sort();
    info!(pairs = inputs.len(), "comparison plan ready");

    let total = inputs.len().max(1);
    let done = AtomicUsize::new(0);

    let results: Vec<Option<PairScore>> = inputs
        .par_iter()
        .map(|input_path| {
            let scored = score_pair(input_path, input_root, target_root);
            let finished = done.fetch_add(1, Ordering::Relaxed) + 1;
            on_progress(finished as f32 / total as f32);
            scored
        })
        .collect();

    let mut report = CompareReport::default();
    for result in results {
        match result {
            Some(score) => report.pairs.push(score),
            None => report.skipped += 1,
        }
    }
    Ok(report)
}

fn score_pair(input_path: &Path, input_root: &Path, target_root: &Path) -> Option<PairScore> {
    let rel = input_path.strip_prefix(input_root).ok()?;
    let target_path = target_root.join(rel);
    if !target_path.is_file() {
        warn!(pair = %rel.display(), "target counterpart missing, pair skipped");
        return None;
    }

    let input = match load_image(input_path) {
        Ok(frame) => frame,
        Err(err) => {
            warn!(path = %input_path.display(), %err, "unreadable input frame, pair skipped");
            return None;
        }
    };
    let target = match load_image(&target_path) {
        Ok(frame) => frame,
        Err(err) => {
            warn!(path = %target_path.display(), %err, "unreadable target frame, pair skipped");
            return None;
        }
    };

    match compare_frames(&input, &target) {
        Some((psnr, ssim)) => Some(PairScore {
            rel_path: rel.to_path_buf(),
            psnr,
            ssim,
        }),
        None => {
            debug!(pair = %rel.display(), "dimension mismatch, pair skipped");
            None
        }
    }
}
