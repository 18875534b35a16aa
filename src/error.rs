use thiserror::Error;

/// Everything that can stop an analysis from producing a `Score`.
#[derive(Debug, Error)]
pub enum Error {
    /// A configuration value that would make the scoring math undefined.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A raw RGBA buffer whose length does not match `width * height * 4`.
    #[error("invalid pixel buffer: expected {expected} bytes, got {actual}")]
    InvalidBuffer { expected: usize, actual: usize },

    #[error("image processing error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// A parallel worker went away before answering.
    #[error("worker pool failure: {0}")]
    Worker(String),
}

pub type Result<T> = std::result::Result<T, Error>;
