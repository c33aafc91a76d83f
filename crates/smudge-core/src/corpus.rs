use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::config::{DatasetConfig, ExtractParams};
use crate::degrade::{degrade_frame, degrade_video, DegradationSpec, Mode};
use crate::error::Result;
use crate::extract::extract_video;
use crate::io::image_io::{load_image, save_png};

/// Category subdirectories expected under a corpus root.
pub const DEFAULT_CATEGORIES: [&str; 4] = ["th", "th-bb", "th-m", "th-ob"];

/// Video container extensions the tree drivers pick up.
pub const VIDEO_EXTENSIONS: [&str; 4] = ["mp4", "avi", "mov", "mkv"];

/// Default name of the plain-text run log, written under the input root.
pub const LOG_FILE_NAME: &str = "degradation_log.txt";

/// Golden-ratio increment for deriving per-item seeds from the base seed.
const SEED_MIX: u64 = 0x9E37_79B9_7F4A_7C15;

/// Use the configured seed or draw a fresh one. Reporting the returned
/// value is what makes an unseeded run reproducible after the fact.
pub fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(rand::random)
}

/// Per-item RNG, so parallel workers draw independent streams that do not
/// depend on scheduling order.
fn item_rng(base_seed: u64, index: usize) -> StdRng {
    StdRng::seed_from_u64(base_seed ^ (index as u64).wrapping_mul(SEED_MIX))
}

/// One degraded output and the spec that produced it.
#[derive(Clone, Debug, Serialize)]
pub struct LogRecord {
    pub source: PathBuf,
    pub output: PathBuf,
    pub spec: DegradationSpec,
}

impl LogRecord {
    fn line(&self) -> String {
        format!(
            "{} -> {} : {}",
            self.source.display(),
            self.output.display(),
            self.spec.mode()
        )
    }
}

/// Append-only record collection, shared across worker threads.
#[derive(Debug, Default)]
pub struct DegradationLog {
    records: Mutex<Vec<LogRecord>>,
}

impl DegradationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, record: LogRecord) {
        self.records.lock().unwrap().push(record);
    }

    pub fn extend(&self, records: Vec<LogRecord>) {
        self.records.lock().unwrap().extend(records);
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Write all records as `source -> output : mode` lines, newline
    /// terminated.
    ///
    /// Records are sorted by source path so a seeded run produces the same
    /// file regardless of worker scheduling.
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut records = self.records.lock().unwrap().clone();
        records.sort_by(|a, b| a.source.cmp(&b.source));

        let mut text = String::new();
        for record in &records {
            text.push_str(&record.line());
            text.push('\n');
        }
        fs::write(path, text)?;
        Ok(())
    }
}

/// Dataset generation stage, for progress reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Extract,
    Degrade,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Extract => write!(f, "Extracting frames"),
            Stage::Degrade => write!(f, "Degrading frames"),
        }
    }
}

fn is_video(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| VIDEO_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Collect video files under `<root>/<category>`, recursively, in sorted
/// order. Missing category directories are skipped with a warning.
fn collect_videos(root: &Path, categories: &[String]) -> Vec<PathBuf> {
    let mut videos = Vec::new();
    for category in categories {
        let dir = root.join(category);
        if !dir.is_dir() {
            warn!(category = %category, "category directory missing, skipping");
            continue;
        }
        for entry in WalkDir::new(&dir).into_iter().filter_map(|e| e.ok()) {
            if entry.file_type().is_file() && is_video(entry.path()) {
                videos.push(entry.into_path());
            }
        }
    }
    videos.sort();
    videos
}

/// A directory that directly contains extracted frames.
struct FrameDir {
    path: PathBuf,
    frames: Vec<PathBuf>,
}

/// Group PNGs under `<root>/<category>` by their parent directory, in
/// sorted order.
fn collect_frame_dirs(root: &Path, categories: &[String]) -> Vec<FrameDir> {
    let mut by_dir: BTreeMap<PathBuf, Vec<PathBuf>> = BTreeMap::new();
    for category in categories {
        let dir = root.join(category);
        if !dir.is_dir() {
            warn!(category = %category, "category directory missing, skipping");
            continue;
        }
        for entry in WalkDir::new(&dir).into_iter().filter_map(|e| e.ok()) {
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.into_path();
            if path.extension().and_then(|e| e.to_str()) != Some("png") {
                continue;
            }
            if let Some(parent) = path.parent().map(Path::to_path_buf) {
                by_dir.entry(parent).or_default().push(path);
            }
        }
    }

    by_dir
        .into_iter()
        .map(|(path, mut frames)| {
            frames.sort();
            FrameDir { path, frames }
        })
        .collect()
}

/// Mirror a source path under the destination root.
fn mirror_path(src: &Path, src_root: &Path, dst_root: &Path) -> PathBuf {
    match src.strip_prefix(src_root) {
        Ok(rel) => dst_root.join(rel),
        Err(_) => dst_root.join(src),
    }
}

/// Walk `<src_root>/<category>` for video files and extract each one into
/// `<dst_root>/<category>/<relative dirs>/<video stem>/`.
///
/// Unreadable videos are skipped with a warning. Returns the total number
/// of frames written; `on_progress` receives the completed fraction after
/// each video.
pub fn extract_tree(
    src_root: &Path,
    dst_root: &Path,
    categories: &[String],
    params: &ExtractParams,
    on_progress: impl Fn(f32) + Send + Sync,
) -> Result<usize> {
    params.validate()?;

    let videos = collect_videos(src_root, categories);
    info!(videos = videos.len(), "extraction plan ready");

    let total = videos.len().max(1);
    let done = AtomicUsize::new(0);

    let extracted = videos
        .par_iter()
        .map(|src| {
            let out_dir = mirror_path(src, src_root, dst_root).with_extension("");
            let count = match extract_video(src, &out_dir, params) {
                Ok(n) => n,
                Err(err) => {
                    warn!(video = %src.display(), %err, "extraction failed, skipping");
                    0
                }
            };
            let finished = done.fetch_add(1, Ordering::Relaxed) + 1;
            on_progress(finished as f32 / total as f32);
            count
        })
        .sum();

    Ok(extracted)
}

/// Degrade every frame directory under the target categories into the
/// mirrored path under the input root.
///
/// The mode is chosen once per directory (uniformly, unless the config
/// pins one) while continuous parameters are redrawn per frame.
/// `on_progress` receives the completed fraction after each frame.
pub fn degrade_frame_tree(
    config: &DatasetConfig,
    seed: u64,
    on_progress: impl Fn(f32) + Send + Sync,
) -> Result<DegradationLog> {
    config.validate()?;

    let dirs = collect_frame_dirs(&config.target_root, &config.categories);
    let total_frames: usize = dirs.iter().map(|d| d.frames.len()).sum();
    info!(
        directories = dirs.len(),
        frames = total_frames,
        seed,
        "frame degradation plan ready"
    );

    let done = AtomicUsize::new(0);
    let tick = || {
        let finished = done.fetch_add(1, Ordering::Relaxed) + 1;
        on_progress(finished as f32 / total_frames.max(1) as f32);
    };

    let log = DegradationLog::new();
    dirs.par_iter().enumerate().for_each(|(index, dir)| {
        let mut rng = item_rng(seed, index);
        let mode = config
            .degrade
            .mode
            .unwrap_or_else(|| Mode::choose(&mut rng));

        match degrade_dir_frames(dir, config, mode, &mut rng, &tick) {
            Ok(records) => log.extend(records),
            Err(err) => {
                warn!(dir = %dir.path.display(), %err, "directory degradation failed, skipping");
            }
        }
    });

    Ok(log)
}

fn degrade_dir_frames<R: Rng + ?Sized>(
    dir: &FrameDir,
    config: &DatasetConfig,
    mode: Mode,
    rng: &mut R,
    on_frame: &(impl Fn() + Send + Sync),
) -> Result<Vec<LogRecord>> {
    let out_dir = mirror_path(&dir.path, &config.target_root, &config.input_root);
    fs::create_dir_all(&out_dir)?;

    let mut records = Vec::with_capacity(dir.frames.len());
    for src in &dir.frames {
        let frame = match load_image(src) {
            Ok(f) => f,
            Err(err) => {
                warn!(frame = %src.display(), %err, "unreadable frame, skipping");
                on_frame();
                continue;
            }
        };

        let spec = DegradationSpec::draw(
            mode,
            &config.degrade,
            frame.width(),
            frame.height(),
            rng,
        );
        let degraded = degrade_frame(&frame, &spec)?;

        if let Some(name) = src.file_name() {
            let dst = out_dir.join(name);
            save_png(&degraded, &dst)?;
            records.push(LogRecord {
                source: src.clone(),
                output: dst,
                spec,
            });
        }
        on_frame();
    }
    Ok(records)
}

/// Degrade every video under the target categories into the mirrored path
/// under the input root, one spec drawn per video.
///
/// `on_progress` receives the completed fraction after each video.
pub fn degrade_video_tree(
    config: &DatasetConfig,
    seed: u64,
    on_progress: impl Fn(f32) + Send + Sync,
) -> Result<DegradationLog> {
    config.validate()?;

    let videos = collect_videos(&config.target_root, &config.categories);
    info!(videos = videos.len(), seed, "video degradation plan ready");

    let total = videos.len().max(1);
    let done = AtomicUsize::new(0);

    let log = DegradationLog::new();
    videos.par_iter().enumerate().for_each(|(index, src)| {
        let mut rng = item_rng(seed, index);
        let mode = config
            .degrade
            .mode
            .unwrap_or_else(|| Mode::choose(&mut rng));
        let dst = mirror_path(src, &config.target_root, &config.input_root);

        match degrade_video(src, &dst, mode, &config.degrade, &mut rng) {
            Ok(spec) => log.push(LogRecord {
                source: src.clone(),
                output: dst,
                spec,
            }),
            Err(err) => {
                warn!(video = %src.display(), %err, "video degradation failed, skipping");
            }
        }
        let finished = done.fetch_add(1, Ordering::Relaxed) + 1;
        on_progress(finished as f32 / total as f32);
    });

    Ok(log)
}

/// End-to-end dataset build: extract clean frames from `source_root` into
/// the target tree, then synthesize the degraded input tree.
pub fn generate_dataset(
    source_root: &Path,
    config: &DatasetConfig,
    seed: u64,
    on_progress: impl Fn(Stage, f32) + Send + Sync,
) -> Result<DegradationLog> {
    let extracted = extract_tree(
        source_root,
        &config.target_root,
        &config.categories,
        &config.extract,
        |f| on_progress(Stage::Extract, f),
    )?;
    info!(frames = extracted, "extraction stage complete");

    degrade_frame_tree(config, seed, |f| on_progress(Stage::Degrade, f))
}
