//! Tracer errors.

use thiserror::Error;

/// Errors raised while configuring the tracer or writing its output.
#[derive(Error, Debug)]
pub enum TracerError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unknown camera projection: {0}")]
    UnknownProjection(String),

    #[error("Config JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
}

/// Result type for tracer operations.
pub type TracerResult<T> = Result<T, TracerError>;
