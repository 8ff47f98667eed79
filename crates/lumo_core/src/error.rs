//! Errors raised while building or loading a scene.

use thiserror::Error;

/// Errors that can occur while building or loading a scene.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Scene JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Image decoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Unknown group: {0}")]
    UnknownGroup(String),

    #[error("Unknown material: {0}")]
    UnknownMaterial(String),

    #[error("Unknown object id: {0}")]
    UnknownObject(usize),

    #[error("Duplicate name: {0}")]
    DuplicateName(String),

    #[error("Invalid cube map: {0}")]
    InvalidCubeMap(String),
}

/// Result type for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;
