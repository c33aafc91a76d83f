use std::io::{Read, Write};
use std::path::Path;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

use ndarray::Array3;
use tracing::debug;

use crate::consts::COLOR_CHANNEL_COUNT;
use crate::error::{Result, SmudgeError};
use crate::frame::{Frame, VideoMeta};

/// Probe a video's stream parameters with ffprobe.
pub fn probe_video(path: &Path) -> Result<VideoMeta> {
    let output = Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-select_streams",
            "v:0",
            "-show_entries",
            "stream=width,height,r_frame_rate,nb_frames",
            "-of",
            "csv=p=0",
        ])
        .arg(path)
        .output()
        .map_err(|e| SmudgeError::Probe(format!("failed to run ffprobe: {e}")))?;

    if !output.status.success() {
        return Err(SmudgeError::Probe(format!(
            "ffprobe failed for {}: {}",
            path.display(),
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    parse_probe_output(&String::from_utf8_lossy(&output.stdout))
}

/// Parse one ffprobe CSV line: `width,height,r_frame_rate[,nb_frames]`.
///
/// `nb_frames` is `N/A` in containers that do not index frames; the count
/// comes back as `None` there.
pub fn parse_probe_output(stdout: &str) -> Result<VideoMeta> {
    let line = stdout.lines().next().unwrap_or("").trim();
    let parts: Vec<&str> = line.split(',').collect();
    if parts.len() < 3 {
        return Err(SmudgeError::Probe(format!(
            "unexpected ffprobe output: {stdout:?}"
        )));
    }

    let width: u32 = parts[0]
        .parse()
        .map_err(|_| SmudgeError::Probe(format!("bad width: {:?}", parts[0])))?;
    let height: u32 = parts[1]
        .parse()
        .map_err(|_| SmudgeError::Probe(format!("bad height: {:?}", parts[1])))?;
    if width == 0 || height == 0 {
        return Err(SmudgeError::InvalidDimensions { width, height });
    }

    let fps_raw = parts[2].to_string();
    let fps = match parts[2].split_once('/') {
        Some((num, den)) => {
            let n: f64 = num.parse().unwrap_or(0.0);
            let d: f64 = den.parse().unwrap_or(0.0);
            if d > 0.0 {
                n / d
            } else {
                0.0
            }
        }
        None => parts[2].parse().unwrap_or(0.0),
    };
    if !fps.is_finite() || fps <= 0.0 {
        return Err(SmudgeError::Probe(format!(
            "bad frame rate: {:?}",
            parts[2]
        )));
    }

    let frame_count = parts.get(3).and_then(|s| s.parse::<usize>().ok());

    Ok(VideoMeta {
        width,
        height,
        fps,
        fps_raw,
        frame_count,
    })
}

/// Streaming decoder backed by an ffmpeg child process.
///
/// Frames arrive as raw rgb24 over a pipe. The reader owns the decode
/// handle for the file; the child is reaped on drop even when the stream
/// was not fully consumed.
pub struct VideoReader {
    child: Child,
    stdout: ChildStdout,
    meta: VideoMeta,
    buf: Vec<u8>,
}

impl VideoReader {
    /// Probe `path` and spawn the decode process.
    pub fn open(path: &Path) -> Result<Self> {
        let meta = probe_video(path)?;
        debug!(
            video = %path.display(),
            width = meta.width,
            height = meta.height,
            fps = meta.fps,
            "opening decoder"
        );

        let mut child = Command::new("ffmpeg")
            .arg("-i")
            .arg(path)
            .args(["-f", "rawvideo", "-pix_fmt", "rgb24", "-v", "error", "pipe:1"])
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| SmudgeError::Decode(format!("failed to spawn ffmpeg: {e}")))?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| SmudgeError::Decode("ffmpeg stdout unavailable".to_string()))?;
        let buf = vec![0u8; meta.frame_byte_size()];

        Ok(Self {
            child,
            stdout,
            meta,
            buf,
        })
    }

    pub fn meta(&self) -> &VideoMeta {
        &self.meta
    }

    /// Read the next frame; `None` at end of stream.
    pub fn read_frame(&mut self) -> Result<Option<Frame>> {
        if !fill_frame_buf(&mut self.stdout, &mut self.buf)? {
            return Ok(None);
        }
        Ok(Some(decode_rgb24(
            &self.buf,
            self.meta.height as usize,
            self.meta.width as usize,
        )))
    }

    /// Iterator over the remaining frames.
    pub fn frames(&mut self) -> impl Iterator<Item = Result<Frame>> + '_ {
        std::iter::from_fn(move || self.read_frame().transpose())
    }
}

impl Drop for VideoReader {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// Fill `buf` from the pipe. False means clean EOF at a frame boundary;
/// EOF mid-frame is a decode error.
fn fill_frame_buf(reader: &mut impl Read, buf: &mut [u8]) -> Result<bool> {
    let mut filled = 0;
    while filled < buf.len() {
        let n = reader.read(&mut buf[filled..])?;
        if n == 0 {
            if filled == 0 {
                return Ok(false);
            }
            return Err(SmudgeError::Decode(format!(
                "stream truncated mid-frame ({filled} of {} bytes)",
                buf.len()
            )));
        }
        filled += n;
    }
    Ok(true)
}

fn decode_rgb24(raw: &[u8], h: usize, w: usize) -> Frame {
    let mut data = Array3::<f32>::zeros((h, w, COLOR_CHANNEL_COUNT));
    for row in 0..h {
        for col in 0..w {
            let base = (row * w + col) * COLOR_CHANNEL_COUNT;
            for ch in 0..COLOR_CHANNEL_COUNT {
                data[[row, col, ch]] = raw[base + ch] as f32 / 255.0;
            }
        }
    }
    Frame::new(data)
}

fn encode_rgb24(frame: &Frame) -> Vec<u8> {
    let h = frame.height();
    let w = frame.width();
    let mut raw = Vec::with_capacity(h * w * COLOR_CHANNEL_COUNT);
    for row in 0..h {
        for col in 0..w {
            for ch in 0..COLOR_CHANNEL_COUNT {
                let v = frame.data[[row, col, ch]];
                raw.push((v.clamp(0.0, 1.0) * 255.0).round() as u8);
            }
        }
    }
    raw
}

/// Streaming encoder backed by an ffmpeg child process.
///
/// Frames go out as raw rgb24 over a pipe and are re-encoded with MPEG-4
/// at the frame rate passed to `create`. The container follows the output
/// file extension.
pub struct VideoWriter {
    child: Child,
    stdin: Option<ChildStdin>,
    width: u32,
    height: u32,
}

impl VideoWriter {
    /// Spawn the encode process. Parent directories are created as needed.
    pub fn create(path: &Path, width: u32, height: u32, fps_raw: &str) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let size = format!("{width}x{height}");
        let mut child = Command::new("ffmpeg")
            .args([
                "-y", "-f", "rawvideo", "-pix_fmt", "rgb24", "-s", &size, "-r", fps_raw, "-i",
                "pipe:0", "-c:v", "mpeg4", "-q:v", "5", "-v", "error",
            ])
            .arg(path)
            .stdin(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| SmudgeError::Encode(format!("failed to spawn ffmpeg: {e}")))?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| SmudgeError::Encode("ffmpeg stdin unavailable".to_string()))?;

        Ok(Self {
            child,
            stdin: Some(stdin),
            width,
            height,
        })
    }

    /// Append one frame to the stream.
    pub fn write_frame(&mut self, frame: &Frame) -> Result<()> {
        if frame.width() != self.width as usize || frame.height() != self.height as usize {
            return Err(SmudgeError::InvalidDimensions {
                width: frame.width() as u32,
                height: frame.height() as u32,
            });
        }
        let raw = encode_rgb24(frame);
        if let Some(stdin) = self.stdin.as_mut() {
            stdin
                .write_all(&raw)
                .map_err(|e| SmudgeError::Encode(format!("ffmpeg pipe closed: {e}")))?;
        }
        Ok(())
    }

    /// Close the stream and wait for the encoder to finish.
    pub fn finalize(mut self) -> Result<()> {
        drop(self.stdin.take());
        let status = self.child.wait()?;
        if !status.success() {
            return Err(SmudgeError::Encode(format!("ffmpeg exited with {status}")));
        }
        Ok(())
    }
}

impl Drop for VideoWriter {
    fn drop(&mut self) {
        drop(self.stdin.take());
        let _ = self.child.wait();
    }
}
