use std::path::Path;

use tracing::{debug, warn};

use crate::config::ExtractParams;
use crate::error::Result;
use crate::frame::Frame;
use crate::io::image_io::save_png;
use crate::io::video::VideoReader;

/// Number of source frames per kept frame when resampling `native_fps`
/// down to `target_fps`. Rounded to the nearest integer, never below 1.
pub fn sample_interval(native_fps: f64, target_fps: f64) -> usize {
    if target_fps <= 0.0 {
        return 1;
    }
    let interval = (native_fps / target_fps).round() as usize;
    interval.max(1)
}

/// Save every `interval`-th frame as a zero-padded PNG under `out_dir`.
/// Returns the number of frames written.
///
/// Sampling is index-based; variable-frame-rate sources drift accordingly.
/// A decode error mid-stream ends extraction for this source and the
/// frames already written are kept.
pub fn extract_frames(
    frames: impl Iterator<Item = Result<Frame>>,
    out_dir: &Path,
    interval: usize,
) -> Result<usize> {
    std::fs::create_dir_all(out_dir)?;
    let interval = interval.max(1);

    let mut saved = 0usize;
    for (index, frame) in frames.enumerate() {
        let frame = match frame {
            Ok(f) => f,
            Err(err) => {
                warn!(%err, saved, "decode failed mid-stream, keeping frames extracted so far");
                break;
            }
        };
        if index % interval == 0 {
            save_png(&frame, &out_dir.join(format!("{saved:04}.png")))?;
            saved += 1;
        }
    }
    Ok(saved)
}

/// Extract frames from one video file into `out_dir`.
pub fn extract_video(path: &Path, out_dir: &Path, params: &ExtractParams) -> Result<usize> {
    let mut reader = VideoReader::open(path)?;
    let interval = if params.every_frame {
        1
    } else {
        sample_interval(reader.meta().fps, params.fps)
    };
    debug!(
        video = %path.display(),
        fps = reader.meta().fps,
        interval,
        "extracting frames"
    );
    extract_frames(reader.frames(), out_dir, interval)
}
