use thiserror::Error;

#[derive(Debug, Error)]
pub enum GrowPackError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[cfg(feature = "image")]
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("Invalid block #{index} ({label}): {width}x{height}; width and height must be finite and positive")]
    InvalidBlock {
        index: usize,
        label: String,
        width: f64,
        height: f64,
    },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("{unplaced} of {total} blocks could not be placed")]
    Unplaced { unplaced: usize, total: usize },
}

pub type Result<T> = std::result::Result<T, GrowPackError>;
