//! # Draft Factors
//!
//! Scale factors for molded-body tapers. A body of size `size` drafted over
//! `height` at `angle` shrinks by
//!
//! ```text
//! shrink = 1 - sin(angle) * height / size
//! grow   = 1 / shrink
//! ```
//!
//! Applying `shrink` and later `grow` to the same ring returns the original
//! footprint, so a stack of opposite drafts closes exactly.

use std::f64::consts::FRAC_PI_2;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::error::{MeshError, MeshResult};
use crate::transform::Transform;

/// A shrink factor and its exact inverse.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DraftFactors {
    pub shrink: f64,
    pub grow: f64,
}

impl DraftFactors {
    /// Factors for a draft `angle` (radians) over `height`.
    ///
    /// # Errors
    ///
    /// Fails for a non-positive size, a negative height, an angle outside
    /// `[0, pi/2)`, or a draft that would shrink the body to nothing.
    ///
    /// # Example
    ///
    /// ```rust
    /// use partmesh::DraftFactors;
    ///
    /// let draft = DraftFactors::from_angle(10.0, 1.0, 6f64.to_radians()).unwrap();
    /// assert!(draft.shrink < 1.0);
    /// assert!((draft.shrink * draft.grow - 1.0).abs() < 1e-12);
    /// ```
    pub fn from_angle(size: f64, height: f64, angle: f64) -> MeshResult<Self> {
        if !(height >= 0.0) || !height.is_finite() {
            return Err(MeshError::invalid_parameter(format!(
                "draft height must not be negative, got {height}"
            )));
        }
        if !(0.0..FRAC_PI_2).contains(&angle) {
            return Err(MeshError::invalid_parameter(format!(
                "draft angle must be in [0, pi/2), got {angle}"
            )));
        }
        Self::from_offset(size, angle.sin() * height)
    }

    /// Factors for a chamfer of width `chamfer` on a body of size `size`.
    pub fn from_chamfer(size: f64, chamfer: f64) -> MeshResult<Self> {
        if !(chamfer >= 0.0) || !chamfer.is_finite() {
            return Err(MeshError::invalid_parameter(format!(
                "chamfer must not be negative, got {chamfer}"
            )));
        }
        Self::from_offset(size, chamfer)
    }

    fn from_offset(size: f64, offset: f64) -> MeshResult<Self> {
        if !(size > 0.0) || !size.is_finite() {
            return Err(MeshError::invalid_parameter(format!(
                "draft size must be positive, got {size}"
            )));
        }
        let shrink = 1.0 - offset / size;
        if !(shrink > 0.0) {
            return Err(MeshError::invalid_parameter(format!(
                "draft of {offset} consumes the whole size {size}"
            )));
        }
        Ok(Self {
            shrink,
            grow: 1.0 / shrink,
        })
    }

    /// No taper.
    pub fn none() -> Self {
        Self {
            shrink: 1.0,
            grow: 1.0,
        }
    }
}

/// Builds a step that scales X and Y by the given factors and rises by
/// `height`, for use as [`ExtrudeParams::step`](super::ExtrudeParams).
pub fn draft_step(x: f64, y: f64, height: f64) -> Transform {
    Transform::identity()
        .with_scale(DVec3::new(x, y, 1.0))
        .with_translation(DVec3::new(0.0, 0.0, height))
}
