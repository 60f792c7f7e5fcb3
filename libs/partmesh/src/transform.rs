//! # Transform
//!
//! Affine placement of profile and mesh vertices.
//!
//! A [`Transform`] holds an independent scale, rotation and translation and
//! always applies them in that order:
//!
//! ```text
//! p' = rotation * (scale * p) + translation
//! ```
//!
//! Transforms never compose implicitly. Nested placement is expressed by
//! applying the child transform first and the parent transform second.

use config::constants::EPSILON;
use glam::{DMat4, DQuat, DVec3};
use serde::{Deserialize, Serialize};

use crate::error::{MeshError, MeshResult};

/// Scale, rotation and translation applied in that order.
///
/// # Example
///
/// ```rust
/// use partmesh::Transform;
/// use glam::DVec3;
///
/// let mut t = Transform::identity();
/// t.set_uniform_scale(2.0).unwrap();
/// t.set_translation(0.0, 0.0, 1.0).unwrap();
/// assert_eq!(t.apply(DVec3::X), DVec3::new(2.0, 0.0, 1.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TransformFields")]
pub struct Transform {
    scale: DVec3,
    rotation: DQuat,
    translation: DVec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    /// Creates the identity transform.
    pub fn identity() -> Self {
        Self {
            scale: DVec3::ONE,
            rotation: DQuat::IDENTITY,
            translation: DVec3::ZERO,
        }
    }

    // =========================================================================
    // SETTERS
    // =========================================================================

    /// Sets independent scale factors. Zero is allowed and collapses the axis.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::InvalidParameter`] for a NaN or infinite factor.
    pub fn set_scale(&mut self, sx: f64, sy: f64, sz: f64) -> MeshResult<()> {
        self.scale = finite("scale", DVec3::new(sx, sy, sz))?;
        Ok(())
    }

    /// Sets the same scale factor on all three axes.
    pub fn set_uniform_scale(&mut self, s: f64) -> MeshResult<()> {
        self.set_scale(s, s, s)
    }

    /// Sets the rotation from an angle (radians) about an axis.
    ///
    /// The axis is normalized. A zero axis is accepted only together with a
    /// zero angle, which yields the identity rotation.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::InvalidParameter`] for a zero axis with a
    /// non-zero angle, or for non-finite input.
    pub fn set_rotation(&mut self, angle: f64, axis: DVec3) -> MeshResult<()> {
        if !angle.is_finite() || !axis.is_finite() {
            return Err(MeshError::invalid_parameter(format!(
                "rotation must be finite: angle {angle}, axis {axis}"
            )));
        }

        if axis.length_squared() < EPSILON * EPSILON {
            if angle.abs() < EPSILON {
                self.rotation = DQuat::IDENTITY;
                return Ok(());
            }
            return Err(MeshError::invalid_parameter(format!(
                "rotation of {angle} rad about a zero axis"
            )));
        }

        self.rotation = DQuat::from_axis_angle(axis.normalize(), angle);
        Ok(())
    }

    /// Sets the rotation from a quaternion, normalizing it.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::InvalidParameter`] if the quaternion cannot be
    /// normalized.
    pub fn set_rotation_quat(&mut self, rotation: DQuat) -> MeshResult<()> {
        if !rotation.is_finite() || rotation.length_squared() < EPSILON {
            return Err(MeshError::invalid_parameter(format!(
                "rotation quaternion cannot be normalized: {rotation}"
            )));
        }
        self.rotation = rotation.normalize();
        Ok(())
    }

    /// Sets the translation applied after scale and rotation.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::InvalidParameter`] for a NaN or infinite offset.
    pub fn set_translation(&mut self, x: f64, y: f64, z: f64) -> MeshResult<()> {
        self.translation = finite("translation", DVec3::new(x, y, z))?;
        Ok(())
    }

    // =========================================================================
    // BUILDERS
    // =========================================================================
    //
    // Builders do not check finiteness; rings and fragments placed through a
    // non-finite transform are rejected when they are built.

    /// Returns a copy with the given scale.
    pub fn with_scale(mut self, scale: DVec3) -> Self {
        self.scale = scale;
        self
    }

    /// Returns a copy with the given uniform scale.
    pub fn with_uniform_scale(mut self, s: f64) -> Self {
        self.scale = DVec3::splat(s);
        self
    }

    /// Returns a copy rotated by `angle` radians about `axis`.
    pub fn with_rotation(mut self, angle: f64, axis: DVec3) -> MeshResult<Self> {
        self.set_rotation(angle, axis)?;
        Ok(self)
    }

    /// Returns a copy with the given translation.
    pub fn with_translation(mut self, translation: DVec3) -> Self {
        self.translation = translation;
        self
    }

    /// Shorthand for a pure translation.
    pub fn from_translation(translation: DVec3) -> Self {
        Self::identity().with_translation(translation)
    }

    // =========================================================================
    // GETTERS
    // =========================================================================

    #[inline]
    pub fn scale(&self) -> DVec3 {
        self.scale
    }

    #[inline]
    pub fn rotation(&self) -> DQuat {
        self.rotation
    }

    #[inline]
    pub fn translation(&self) -> DVec3 {
        self.translation
    }

    /// Returns true if applying the transform leaves every point unchanged.
    pub fn is_identity(&self) -> bool {
        self.scale.abs_diff_eq(DVec3::ONE, EPSILON)
            && self.translation.abs_diff_eq(DVec3::ZERO, EPSILON)
            && (self.rotation.abs_diff_eq(DQuat::IDENTITY, EPSILON)
                || self.rotation.abs_diff_eq(-DQuat::IDENTITY, EPSILON))
    }

    /// Returns true if the transform reverses orientation (negative
    /// determinant), which flips the facing of emitted polygons.
    pub fn mirrors(&self) -> bool {
        self.scale.x * self.scale.y * self.scale.z < 0.0
    }

    /// Returns the equivalent 4x4 matrix.
    pub fn matrix(&self) -> DMat4 {
        DMat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }

    // =========================================================================
    // APPLICATION
    // =========================================================================

    /// Transforms a point: scale, then rotate, then translate.
    #[inline]
    pub fn apply(&self, point: DVec3) -> DVec3 {
        self.rotation * (self.scale * point) + self.translation
    }

    /// Transforms a direction: scale and rotate, no translation.
    #[inline]
    pub fn apply_vector(&self, vector: DVec3) -> DVec3 {
        self.rotation * (self.scale * vector)
    }

    /// Transforms every point of a slice.
    pub fn apply_all(&self, points: &[DVec3]) -> Vec<DVec3> {
        points.iter().map(|p| self.apply(*p)).collect()
    }
}

/// Serialized form, checked and normalized on the way in.
#[derive(Deserialize)]
struct TransformFields {
    scale: DVec3,
    rotation: DQuat,
    translation: DVec3,
}

impl TryFrom<TransformFields> for Transform {
    type Error = MeshError;

    fn try_from(fields: TransformFields) -> MeshResult<Self> {
        let mut transform = Transform::identity();
        let TransformFields {
            scale,
            rotation,
            translation,
        } = fields;
        transform.set_scale(scale.x, scale.y, scale.z)?;
        transform.set_rotation_quat(rotation)?;
        transform.set_translation(translation.x, translation.y, translation.z)?;
        Ok(transform)
    }
}

fn finite(label: &str, value: DVec3) -> MeshResult<DVec3> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(MeshError::invalid_parameter(format!("{label} must be finite, got {value}")))
    }
}
