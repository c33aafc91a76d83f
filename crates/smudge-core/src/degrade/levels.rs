use crate::frame::Frame;

/// Apply brightness and contrast factors, photo-enhancer style.
///
/// `brightness` scales every channel (1.0 = unchanged, 0.0 = black).
/// `contrast` interpolates toward the input's mean luminance
/// (1.0 = unchanged, 0.0 = flat gray at the mean). Results clamp to [0, 1].
pub fn brightness_contrast(frame: &Frame, brightness: f32, contrast: f32) -> Frame {
    let mean = frame.mean_luma();
    let data = frame.data.mapv(|v| {
        let adjusted = (v * brightness - mean) * contrast + mean;
        adjusted.clamp(0.0, 1.0)
    });
    Frame::new(data)
}
