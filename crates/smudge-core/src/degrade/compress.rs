use image::codecs::jpeg::JpegEncoder;

use crate::error::Result;
use crate::frame::Frame;
use crate::io::image_io::{from_rgb_image, to_rgb_image};

/// Run the frame through an in-memory JPEG encode/decode cycle.
///
/// The compression artifacts stay baked into the raster; callers persist
/// the result losslessly.
pub fn jpeg_roundtrip(frame: &Frame, quality: u8) -> Result<Frame> {
    let rgb = to_rgb_image(frame);

    let mut encoded = Vec::new();
    JpegEncoder::new_with_quality(&mut encoded, quality).encode_image(&rgb)?;

    let decoded = image::load_from_memory(&encoded)?;
    Ok(from_rgb_image(&decoded.to_rgb8()))
}
