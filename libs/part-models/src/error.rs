//! # Model Errors

use partmesh::MeshError;
use thiserror::Error;
use vrml_scene::SceneError;

/// Result alias for model builders.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors raised while building a component model.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Model parameters are inconsistent
    #[error("Invalid model parameter: {message}")]
    InvalidParameter { message: String },

    #[error(transparent)]
    Mesh(#[from] MeshError),

    #[error(transparent)]
    Scene(#[from] SceneError),
}

impl ModelError {
    /// Creates an invalid parameter error.
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            message: message.into(),
        }
    }
}
