use std::path::Path;

use image::{ImageFormat, Rgb, RgbImage};
use ndarray::Array3;

use crate::consts::COLOR_CHANNEL_COUNT;
use crate::error::Result;
use crate::frame::Frame;

/// Quantize a normalized sample to 8 bits. Rounding (rather than truncating)
/// keeps PNG save/load round-trips bit-exact.
fn quantize(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Convert a frame to an 8-bit RGB image buffer.
pub fn to_rgb_image(frame: &Frame) -> RgbImage {
    let h = frame.height();
    let w = frame.width();

    let mut img = RgbImage::new(w as u32, h as u32);
    for row in 0..h {
        for col in 0..w {
            let px = [
                quantize(frame.data[[row, col, 0]]),
                quantize(frame.data[[row, col, 1]]),
                quantize(frame.data[[row, col, 2]]),
            ];
            img.put_pixel(col as u32, row as u32, Rgb(px));
        }
    }
    img
}

/// Convert an 8-bit RGB image buffer to a frame.
pub fn from_rgb_image(img: &RgbImage) -> Frame {
    let (w, h) = img.dimensions();
    let mut data = Array3::<f32>::zeros((h as usize, w as usize, COLOR_CHANNEL_COUNT));

    for row in 0..h as usize {
        for col in 0..w as usize {
            let px = img.get_pixel(col as u32, row as u32);
            for ch in 0..COLOR_CHANNEL_COUNT {
                data[[row, col, ch]] = px.0[ch] as f32 / 255.0;
            }
        }
    }
    Frame::new(data)
}

/// Save a frame as 8-bit RGB PNG.
pub fn save_png(frame: &Frame, path: &Path) -> Result<()> {
    to_rgb_image(frame).save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

/// Load an image file into an RGB frame.
pub fn load_image(path: &Path) -> Result<Frame> {
    let img = image::open(path)?;
    Ok(from_rgb_image(&img.to_rgb8()))
}
