/// Minimum pixel count (h*w) to use row-level Rayon parallelism.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// ITU-R BT.601 luminance coefficient for the red channel.
pub const LUMINANCE_R: f32 = 0.299;

/// ITU-R BT.601 luminance coefficient for the green channel.
pub const LUMINANCE_G: f32 = 0.587;

/// ITU-R BT.601 luminance coefficient for the blue channel.
pub const LUMINANCE_B: f32 = 0.114;

/// Number of channels in a color frame (R, G, B).
pub const COLOR_CHANNEL_COUNT: usize = 3;

/// Peak value of an 8-bit pixel, the reference level for PSNR.
pub const PIXEL_MAX: f64 = 255.0;

/// Side length of the square SSIM window, in pixels. Must be odd.
pub const SSIM_WINDOW: usize = 7;

/// SSIM stability constant scaling the luminance term.
pub const SSIM_K1: f64 = 0.01;

/// SSIM stability constant scaling the contrast term.
pub const SSIM_K2: f64 = 0.03;

/// Default sampling rate for frame extraction, in frames per second.
pub const DEFAULT_SAMPLE_FPS: f64 = 5.0;
