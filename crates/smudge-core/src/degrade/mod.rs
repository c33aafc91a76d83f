mod block_noise;
mod blur;
mod compress;
mod levels;

pub use block_noise::{apply_patches, draw_patches, Patch};
pub use blur::gaussian_blur;
pub use compress::jpeg_roundtrip;
pub use levels::brightness_contrast;

use std::fmt;
use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::DegradeParams;
use crate::error::Result;
use crate::frame::Frame;
use crate::io::video::{VideoReader, VideoWriter};

/// A degradation family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Blur,
    Compression,
    BrightnessContrast,
    BlockNoise,
}

/// Every mode, for uniform random choice.
pub const MODE_CATALOG: [Mode; 4] = [
    Mode::Blur,
    Mode::Compression,
    Mode::BrightnessContrast,
    Mode::BlockNoise,
];

impl Mode {
    /// Pick a mode uniformly from the catalog.
    pub fn choose<R: Rng + ?Sized>(rng: &mut R) -> Mode {
        MODE_CATALOG[rng.random_range(0..MODE_CATALOG.len())]
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Blur => "blur",
            Mode::Compression => "compression",
            Mode::BrightnessContrast => "brightness_contrast",
            Mode::BlockNoise => "block_noise",
        };
        write!(f, "{name}")
    }
}

/// A fully drawn degradation: the mode plus every sampled parameter.
///
/// Applying a spec is deterministic, so one spec reused across a video
/// corrupts every frame identically.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum DegradationSpec {
    Blur { sigma: f32 },
    Compression { quality: u8 },
    BrightnessContrast { brightness: f32, contrast: f32 },
    BlockNoise { patches: Vec<Patch> },
}

impl DegradationSpec {
    /// Draw a spec for a `width` x `height` frame.
    pub fn draw<R: Rng + ?Sized>(
        mode: Mode,
        params: &DegradeParams,
        width: usize,
        height: usize,
        rng: &mut R,
    ) -> Self {
        match mode {
            Mode::Blur => DegradationSpec::Blur {
                sigma: params.sigma.sample(rng),
            },
            Mode::Compression => DegradationSpec::Compression {
                quality: params.quality.sample(rng),
            },
            Mode::BrightnessContrast => DegradationSpec::BrightnessContrast {
                brightness: params.brightness.sample(rng),
                contrast: params.contrast.sample(rng),
            },
            Mode::BlockNoise => DegradationSpec::BlockNoise {
                patches: draw_patches(params, width, height, rng),
            },
        }
    }

    pub fn mode(&self) -> Mode {
        match self {
            DegradationSpec::Blur { .. } => Mode::Blur,
            DegradationSpec::Compression { .. } => Mode::Compression,
            DegradationSpec::BrightnessContrast { .. } => Mode::BrightnessContrast,
            DegradationSpec::BlockNoise { .. } => Mode::BlockNoise,
        }
    }
}

/// Apply a drawn spec to one frame. Output dimensions always match the
/// input.
pub fn degrade_frame(frame: &Frame, spec: &DegradationSpec) -> Result<Frame> {
    match spec {
        DegradationSpec::Blur { sigma } => Ok(gaussian_blur(frame, *sigma)),
        DegradationSpec::Compression { quality } => jpeg_roundtrip(frame, *quality),
        DegradationSpec::BrightnessContrast {
            brightness,
            contrast,
        } => Ok(brightness_contrast(frame, *brightness, *contrast)),
        DegradationSpec::BlockNoise { patches } => Ok(apply_patches(frame, patches)),
    }
}

/// Degrade a whole video with a single drawn spec.
///
/// The spec is drawn once from the stream dimensions and applied to every
/// frame, keeping the corruption temporally consistent. The output keeps
/// the source resolution and frame rate.
pub fn degrade_video<R: Rng + ?Sized>(
    src: &Path,
    dst: &Path,
    mode: Mode,
    params: &DegradeParams,
    rng: &mut R,
) -> Result<DegradationSpec> {
    let mut reader = VideoReader::open(src)?;
    let meta = reader.meta().clone();
    let spec = DegradationSpec::draw(
        mode,
        params,
        meta.width as usize,
        meta.height as usize,
        rng,
    );

    debug!(
        src = %src.display(),
        dst = %dst.display(),
        mode = %spec.mode(),
        "degrading video"
    );

    let mut writer = VideoWriter::create(dst, meta.width, meta.height, &meta.fps_raw)?;
    while let Some(frame) = reader.read_frame()? {
        let degraded = degrade_frame(&frame, &spec)?;
        writer.write_frame(&degraded)?;
    }
    writer.finalize()?;

    Ok(spec)
}
