use thiserror::Error;

#[derive(Error, Debug)]
pub enum PyroError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed temperature field: {0}")]
    DataFormat(String),

    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Invalid field dimensions: {width}x{height} for {samples} samples")]
    InvalidDimensions {
        width: usize,
        height: usize,
        samples: usize,
    },

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, PyroError>;
