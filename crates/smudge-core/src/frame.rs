use ndarray::{Array2, Array3};

use crate::consts::{COLOR_CHANNEL_COUNT, LUMINANCE_B, LUMINANCE_G, LUMINANCE_R};

/// A single RGB image frame.
/// Pixel values are f32 in [0.0, 1.0].
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    /// Pixel data, row-major, shape = (height, width, channel)
    pub data: Array3<f32>,
}

impl Frame {
    pub fn new(data: Array3<f32>) -> Self {
        Self { data }
    }

    pub fn width(&self) -> usize {
        self.data.dim().1
    }

    pub fn height(&self) -> usize {
        self.data.dim().0
    }

    /// True when both frames have identical spatial dimensions.
    pub fn dims_match(&self, other: &Frame) -> bool {
        self.data.dim() == other.data.dim()
    }

    /// BT.601 luminance projection of the frame.
    pub fn luma(&self) -> Array2<f32> {
        let (h, w, _) = self.data.dim();
        Array2::from_shape_fn((h, w), |(row, col)| {
            LUMINANCE_R * self.data[[row, col, 0]]
                + LUMINANCE_G * self.data[[row, col, 1]]
                + LUMINANCE_B * self.data[[row, col, 2]]
        })
    }

    /// Mean BT.601 luminance over the whole frame.
    pub fn mean_luma(&self) -> f32 {
        self.luma().mean().unwrap_or(0.0)
    }
}

/// Video stream parameters reported by the probe.
#[derive(Clone, Debug)]
pub struct VideoMeta {
    pub width: u32,
    pub height: u32,
    /// Average frame rate in frames per second.
    pub fps: f64,
    /// Frame rate as the probe's rational string (e.g. "30000/1001"),
    /// passed to the encoder untouched.
    pub fps_raw: String,
    /// Total frame count, when the container reports one.
    pub frame_count: Option<usize>,
}

impl VideoMeta {
    /// Size of one decoded rgb24 frame, in bytes.
    pub fn frame_byte_size(&self) -> usize {
        self.width as usize * self.height as usize * COLOR_CHANNEL_COUNT
    }
}
