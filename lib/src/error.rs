use thiserror::Error;

/// Errors surfaced by a conversion.
#[derive(Debug, Error)]
pub enum Error {
    /// Source image unreadable, corrupt, or empty
    #[error("failed to decode image: {0}")]
    ImageDecode(String),

    /// Font file unreadable or unsupported
    #[error("failed to load font: {0}")]
    FontLoad(String),

    /// Rejected before any processing starts
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        Error::ImageDecode(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
