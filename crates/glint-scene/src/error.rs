//! Error types for the scene model.

use crate::scene::ShapeId;
use thiserror::Error;

/// Errors raised by scene precondition checks.
#[derive(Error, Debug)]
pub enum SceneError {
    /// A shape has no material attached.
    #[error("shape {0} has no material attached")]
    MissingMaterial(ShapeId),

    /// The scene has no lights; tracing needs at least one.
    #[error("scene has no lights")]
    NoLights,
}

/// Result type for scene operations.
pub type Result<T> = std::result::Result<T, SceneError>;
