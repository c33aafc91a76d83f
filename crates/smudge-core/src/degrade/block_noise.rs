use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::DegradeParams;
use crate::frame::Frame;

/// One filled rectangle of block noise.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patch {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
    /// 8-bit gray level painted over all three channels.
    pub fill: u8,
}

/// Draw a random set of patches lying fully inside a `width` x `height`
/// frame.
///
/// Frames smaller than the minimum patch side get no patches at all, so the
/// frame passes through unchanged rather than the draw going out of bounds.
pub fn draw_patches<R: Rng + ?Sized>(
    params: &DegradeParams,
    width: usize,
    height: usize,
    rng: &mut R,
) -> Vec<Patch> {
    if width < params.patch_size.min || height < params.patch_size.min {
        return Vec::new();
    }

    let count = params.patch_count.sample(rng);
    let mut patches = Vec::with_capacity(count);
    for _ in 0..count {
        let pw = params.patch_size.sample(rng).min(width);
        let ph = params.patch_size.sample(rng).min(height);
        patches.push(Patch {
            x: rng.random_range(0..=width - pw),
            y: rng.random_range(0..=height - ph),
            width: pw,
            height: ph,
            fill: rng.random(),
        });
    }
    patches
}

/// Paint the patches over a copy of the frame.
pub fn apply_patches(frame: &Frame, patches: &[Patch]) -> Frame {
    let mut data = frame.data.clone();
    let channels = data.dim().2;

    for p in patches {
        let gray = p.fill as f32 / 255.0;
        for row in p.y..p.y + p.height {
            for col in p.x..p.x + p.width {
                for ch in 0..channels {
                    data[[row, col, ch]] = gray;
                }
            }
        }
    }
    Frame::new(data)
}
