//! # Scene Errors
//!
//! Error types for scene writing and material loading.

use std::path::{Path, PathBuf};

use partmesh::MeshError;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type SceneResult<T> = Result<T, SceneError>;

/// Errors raised while writing a scene.
#[derive(Debug, Error)]
pub enum SceneError {
    /// The output or a material file could not be read or written
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A named file could not be opened or read
    #[error("I/O error on {}: {source}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Scopes were opened and closed out of order
    #[error("Structural error: {message}")]
    Structural { message: String },

    /// A material description is missing a field or holds a bad value
    #[error("Material error: {message}")]
    Material { message: String },

    /// A name cannot be used as a DEF identifier
    #[error("Invalid name: {name:?}")]
    InvalidName { name: String },

    /// A DEF name is already bound to another node in the file
    #[error("Name already defined: {name:?}")]
    DuplicateName { name: String },

    /// Geometry construction failed
    #[error(transparent)]
    Mesh(#[from] MeshError),
}

impl SceneError {
    /// Creates an I/O error that names the file involved.
    pub fn file(path: &Path, source: std::io::Error) -> Self {
        Self::File {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Creates a structural error.
    pub fn structural(message: impl Into<String>) -> Self {
        Self::Structural {
            message: message.into(),
        }
    }

    /// Creates a material error.
    pub fn material(message: impl Into<String>) -> Self {
        Self::Material {
            message: message.into(),
        }
    }
}
