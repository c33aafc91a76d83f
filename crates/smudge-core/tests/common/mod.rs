use std::path::{Path, PathBuf};

use ndarray::Array3;

use smudge_core::frame::Frame;
use smudge_core::io::image_io::save_png;

/// Frame with the same value in every pixel and channel.
pub fn solid_frame(h: usize, w: usize, fill: f32) -> Frame {
    Frame::new(Array3::from_elem((h, w, 3), fill))
}

/// Gray horizontal ramp from 0.0 to 1.0.
pub fn ramp_frame(h: usize, w: usize) -> Frame {
    Frame::new(Array3::from_shape_fn((h, w, 3), |(_, col, _)| {
        col as f32 / (w - 1).max(1) as f32
    }))
}

/// Full-contrast one-pixel checkerboard, identical across channels.
pub fn checker_frame(h: usize, w: usize) -> Frame {
    Frame::new(Array3::from_shape_fn((h, w, 3), |(row, col, _)| {
        if (row + col) % 2 == 0 {
            1.0
        } else {
            0.0
        }
    }))
}

/// Smooth two-dimensional sinusoid, so codec and metric tests see
/// realistic content instead of flat fills.
pub fn textured_frame(h: usize, w: usize) -> Frame {
    Frame::new(Array3::from_shape_fn((h, w, 3), |(row, col, ch)| {
        let y = row as f32 * 0.35 + ch as f32;
        let x = col as f32 * 0.23;
        0.5 + 0.4 * (x.sin() * y.cos())
    }))
}

/// Write `count` numbered PNG frames into `dir`, creating it first.
/// The pattern shifts per frame so every file differs.
pub fn write_frames(dir: &Path, count: usize, h: usize, w: usize) -> Vec<PathBuf> {
    std::fs::create_dir_all(dir).expect("create frame dir");
    (0..count)
        .map(|i| {
            let path = dir.join(format!("{i:04}.png"));
            let mut frame = textured_frame(h, w);
            frame
                .data
                .mapv_inplace(|v| (v + i as f32 * 0.07).fract());
            save_png(&frame, &path).expect("write frame");
            path
        })
        .collect()
}
