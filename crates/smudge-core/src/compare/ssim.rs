use ndarray::Array2;

use crate::consts::{SSIM_K1, SSIM_K2, SSIM_WINDOW};
use crate::frame::Frame;

/// Mean structural similarity between two same-sized frames.
///
/// Runs on the BT.601 luminance planes with a square uniform window,
/// sample-corrected (co)variance, and the usual K1/K2 stability constants.
/// The border where no full window fits is excluded from the mean. Frames
/// smaller than the window fall back to a single window over the whole
/// image.
pub fn ssim(a: &Frame, b: &Frame) -> f64 {
    let x = a.luma().mapv(|v| v as f64);
    let y = b.luma().mapv(|v| v as f64);
    let (h, w) = x.dim();

    if h < SSIM_WINDOW || w < SSIM_WINDOW {
        return global_ssim(&x, &y);
    }
    windowed_ssim(&x, &y)
}

fn windowed_ssim(x: &Array2<f64>, y: &Array2<f64>) -> f64 {
    let (h, w) = x.dim();
    let win = SSIM_WINDOW;
    let np = (win * win) as f64;
    let cov_norm = np / (np - 1.0);
    // Pixel data is normalized to [0, 1], so the dynamic range factor in
    // C1/C2 collapses to the bare stability constants squared.
    let c1 = SSIM_K1 * SSIM_K1;
    let c2 = SSIM_K2 * SSIM_K2;

    let sx = integral(x);
    let sy = integral(y);
    let sxx = integral(&(x * x));
    let syy = integral(&(y * y));
    let sxy = integral(&(x * y));

    let rows = h - win + 1;
    let cols = w - win + 1;
    let mut total = 0.0;

    for row in 0..rows {
        for col in 0..cols {
            let ux = window_sum(&sx, row, col, win) / np;
            let uy = window_sum(&sy, row, col, win) / np;
            let uxx = window_sum(&sxx, row, col, win) / np;
            let uyy = window_sum(&syy, row, col, win) / np;
            let uxy = window_sum(&sxy, row, col, win) / np;

            let vx = cov_norm * (uxx - ux * ux);
            let vy = cov_norm * (uyy - uy * uy);
            let vxy = cov_norm * (uxy - ux * uy);

            let num = (2.0 * ux * uy + c1) * (2.0 * vxy + c2);
            let den = (ux * ux + uy * uy + c1) * (vx + vy + c2);
            total += num / den;
        }
    }

    total / (rows * cols) as f64
}

/// Single-window statistics over the whole image, for frames smaller than
/// the sliding window.
fn global_ssim(x: &Array2<f64>, y: &Array2<f64>) -> f64 {
    let np = x.len() as f64;
    if np < 2.0 {
        // A lone pixel carries no structure to compare.
        return if x == y { 1.0 } else { 0.0 };
    }

    let cov_norm = np / (np - 1.0);
    let c1 = SSIM_K1 * SSIM_K1;
    let c2 = SSIM_K2 * SSIM_K2;

    let ux = x.sum() / np;
    let uy = y.sum() / np;
    let uxx = x.iter().map(|v| v * v).sum::<f64>() / np;
    let uyy = y.iter().map(|v| v * v).sum::<f64>() / np;
    let uxy = x.iter().zip(y.iter()).map(|(a, b)| a * b).sum::<f64>() / np;

    let vx = cov_norm * (uxx - ux * ux);
    let vy = cov_norm * (uyy - uy * uy);
    let vxy = cov_norm * (uxy - ux * uy);

    let num = (2.0 * ux * uy + c1) * (2.0 * vxy + c2);
    let den = (ux * ux + uy * uy + c1) * (vx + vy + c2);
    num / den
}

/// Summed-area table with a zero row/column prefix, so any window sum is
/// four lookups.
fn integral(src: &Array2<f64>) -> Array2<f64> {
    let (h, w) = src.dim();
    let mut out = Array2::<f64>::zeros((h + 1, w + 1));
    for row in 0..h {
        let mut run = 0.0;
        for col in 0..w {
            run += src[[row, col]];
            out[[row + 1, col + 1]] = out[[row, col + 1]] + run;
        }
    }
    out
}

/// Sum over the `win` x `win` window whose top-left corner is (row, col).
fn window_sum(table: &Array2<f64>, row: usize, col: usize, win: usize) -> f64 {
    table[[row + win, col + win]] - table[[row, col + win]] - table[[row + win, col]]
        + table[[row, col]]
}
