use thiserror::Error;

#[derive(Error, Debug)]
pub enum SmudgeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Cannot probe video: {0}")]
    Probe(String),

    #[error("Video decode error: {0}")]
    Decode(String),

    #[error("Video encode error: {0}")]
    Encode(String),

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Invalid parameter range: {0}")]
    InvalidRange(String),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, SmudgeError>;
