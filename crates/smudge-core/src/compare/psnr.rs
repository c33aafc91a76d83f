use crate::consts::PIXEL_MAX;
use crate::frame::Frame;

/// Peak signal-to-noise ratio between two same-sized frames, in dB.
///
/// The mean squared error runs over all channels in the 0-255 domain.
/// Identical frames give `f64::INFINITY`.
pub fn psnr(a: &Frame, b: &Frame) -> f64 {
    let mut sum_sq = 0.0f64;
    for (x, y) in a.data.iter().zip(b.data.iter()) {
        let d = (*x as f64 - *y as f64) * PIXEL_MAX;
        sum_sq += d * d;
    }

    let mse = sum_sq / a.data.len() as f64;
    if mse == 0.0 {
        return f64::INFINITY;
    }
    10.0 * (PIXEL_MAX * PIXEL_MAX / mse).log10()
}
