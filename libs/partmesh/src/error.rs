//! # Mesh Errors
//!
//! Error types for profile construction and mesh generation.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type MeshResult<T> = Result<T, MeshError>;

/// Errors that can occur while building profiles and mesh fragments.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MeshError {
    /// A parameter is outside its accepted range
    #[error("Invalid parameter: {message}")]
    InvalidParameter { message: String },

    /// Two rings that must correspond have different vertex counts
    #[error("Ring cardinality mismatch: expected {expected} vertices, found {found}")]
    CardinalityMismatch { expected: usize, found: usize },

    /// Degenerate geometry
    #[error("Degenerate geometry: {message}")]
    DegenerateGeometry { message: String },

    /// Cap tessellation failed
    #[error("Tessellation failed: {message}")]
    Tessellation { message: String },

    /// Too many vertices
    #[error("Too many vertices: {count} (max: {max})")]
    TooManyVertices { count: usize, max: usize },
}

impl MeshError {
    /// Creates an invalid parameter error.
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            message: message.into(),
        }
    }

    /// Creates a degenerate geometry error.
    pub fn degenerate(message: impl Into<String>) -> Self {
        Self::DegenerateGeometry {
            message: message.into(),
        }
    }

    /// Creates a tessellation error.
    pub fn tessellation(message: impl Into<String>) -> Self {
        Self::Tessellation {
            message: message.into(),
        }
    }

    /// Creates a cardinality mismatch error.
    pub fn cardinality(expected: usize, found: usize) -> Self {
        Self::CardinalityMismatch { expected, found }
    }
}
