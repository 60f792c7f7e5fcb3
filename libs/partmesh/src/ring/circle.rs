//! # Circle
//!
//! Ellipse profile approximated by evenly spaced vertices.

use std::f64::consts::TAU;

use config::constants::{DEFAULT_CIRCLE_VERTICES, MAX_CIRCLE_VERTICES, MAX_RADIUS, MIN_RADIUS, MIN_RING_VERTICES};
use glam::DVec3;
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::{Ring, Winding};
use crate::error::{MeshError, MeshResult};
use crate::transform::Transform;

/// Parameters for circle profiles.
///
/// # Example
///
/// ```rust
/// use partmesh::{CircleParams, Transform};
///
/// let ring = CircleParams { vertices: 8 }
///     .calc(1.0, 1.0, &Transform::identity())
///     .unwrap();
/// assert_eq!(ring.len(), 8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CircleParams {
    /// Vertices around the circumference (3..=360)
    pub vertices: usize,
}

impl Default for CircleParams {
    fn default() -> Self {
        Self {
            vertices: DEFAULT_CIRCLE_VERTICES,
        }
    }
}

impl CircleParams {
    /// Checks the vertex count range.
    pub fn validate(&self) -> MeshResult<()> {
        if !(MIN_RING_VERTICES..=MAX_CIRCLE_VERTICES).contains(&self.vertices) {
            return Err(MeshError::invalid_parameter(format!(
                "circle vertices must be in {MIN_RING_VERTICES}..={MAX_CIRCLE_VERTICES}, got {}",
                self.vertices
            )));
        }
        Ok(())
    }

    /// Generates the ring in the XY plane, starting at +X and running
    /// counter-clockwise, then applies `transform`.
    ///
    /// # Errors
    ///
    /// Fails for an out-of-range vertex count or a radius outside
    /// `[MIN_RADIUS, MAX_RADIUS]`.
    pub fn calc(&self, radius_x: f64, radius_y: f64, transform: &Transform) -> MeshResult<Ring> {
        self.validate()?;
        for radius in [radius_x, radius_y] {
            if !(MIN_RADIUS..=MAX_RADIUS).contains(&radius) {
                return Err(MeshError::invalid_parameter(format!(
                    "circle radius must be in [{MIN_RADIUS}, {MAX_RADIUS}], got {radius}"
                )));
            }
        }

        let step = TAU / self.vertices as f64;
        let vertices = (0..self.vertices)
            .map(|i| {
                let angle = step * i as f64;
                transform.apply(DVec3::new(radius_x * angle.cos(), radius_y * angle.sin(), 0.0))
            })
            .collect();

        trace!(vertices = self.vertices, radius_x, radius_y, "circle ring");
        Ring::new(vertices, Winding::Ccw)
    }
}
