//! # Rectangle
//!
//! Rectangle profile with optional beveled corners.
//!
//! With `bevel_radius == 0` the ring has four sharp corners. Otherwise each
//! corner is replaced by `bevel_segments` vertices on a quarter arc; two
//! vertices per corner give a straight chamfer.

use std::f64::consts::FRAC_PI_2;

use config::constants::{MAX_BEVEL_SEGMENTS, MIN_BEVEL_SEGMENTS, MIN_LENGTH};
use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::{Ring, Winding};
use crate::error::{MeshError, MeshResult};
use crate::transform::Transform;

/// Parameters for rectangle profiles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RectangleParams {
    /// Corner bevel radius; 0 for sharp corners
    pub bevel_radius: f64,
    /// Vertices per beveled corner (2 = chamfer)
    pub bevel_segments: usize,
}

impl Default for RectangleParams {
    fn default() -> Self {
        Self {
            bevel_radius: 0.0,
            bevel_segments: MIN_BEVEL_SEGMENTS,
        }
    }
}

impl RectangleParams {
    /// A chamfered rectangle (two vertices per corner).
    pub fn chamfer(radius: f64) -> Self {
        Self {
            bevel_radius: radius,
            bevel_segments: MIN_BEVEL_SEGMENTS,
        }
    }

    /// Number of vertices `calc` produces.
    pub fn vertex_count(&self) -> usize {
        if self.bevel_radius > 0.0 {
            4 * self.bevel_segments
        } else {
            4
        }
    }

    /// Generates the ring centered on the origin in the XY plane, starting
    /// at the +X/-Y corner and running counter-clockwise, then applies
    /// `transform`.
    ///
    /// # Errors
    ///
    /// Fails for a non-positive side, a negative bevel, a bevel not smaller
    /// than half of either side, or a segment count out of range.
    pub fn calc(&self, width: f64, height: f64, transform: &Transform) -> MeshResult<Ring> {
        if !(width >= MIN_LENGTH && height >= MIN_LENGTH) || !width.is_finite() || !height.is_finite() {
            return Err(MeshError::invalid_parameter(format!(
                "rectangle sides must be positive, got {width} x {height}"
            )));
        }
        if !(self.bevel_radius >= 0.0) {
            return Err(MeshError::invalid_parameter(format!(
                "bevel radius must not be negative, got {}",
                self.bevel_radius
            )));
        }

        let half = DVec2::new(width, height) * 0.5;

        if self.bevel_radius == 0.0 {
            let corners = [
                DVec3::new(half.x, -half.y, 0.0),
                DVec3::new(half.x, half.y, 0.0),
                DVec3::new(-half.x, half.y, 0.0),
                DVec3::new(-half.x, -half.y, 0.0),
            ];
            return Ring::new(transform.apply_all(&corners), Winding::Ccw);
        }

        if self.bevel_radius >= half.x || self.bevel_radius >= half.y {
            return Err(MeshError::invalid_parameter(format!(
                "bevel radius {} must be less than half of {width} x {height}",
                self.bevel_radius
            )));
        }
        if !(MIN_BEVEL_SEGMENTS..=MAX_BEVEL_SEGMENTS).contains(&self.bevel_segments) {
            return Err(MeshError::invalid_parameter(format!(
                "bevel segments must be in {MIN_BEVEL_SEGMENTS}..={MAX_BEVEL_SEGMENTS}, got {}",
                self.bevel_segments
            )));
        }

        let r = self.bevel_radius;
        let inner = half - DVec2::splat(r);
        // Arc centers and start angles, +X/-Y corner first
        let corners = [
            (DVec2::new(inner.x, -inner.y), -FRAC_PI_2),
            (DVec2::new(inner.x, inner.y), 0.0),
            (DVec2::new(-inner.x, inner.y), FRAC_PI_2),
            (DVec2::new(-inner.x, -inner.y), 2.0 * FRAC_PI_2),
        ];
        let step = FRAC_PI_2 / (self.bevel_segments - 1) as f64;

        let mut vertices = Vec::with_capacity(self.vertex_count());
        for (center, start) in corners {
            for k in 0..self.bevel_segments {
                let angle = start + step * k as f64;
                let p = center + DVec2::new(angle.cos(), angle.sin()) * r;
                vertices.push(transform.apply(p.extend(0.0)));
            }
        }

        trace!(width, height, radius = r, segments = self.bevel_segments, "beveled rectangle ring");
        Ring::new(vertices, Winding::Ccw)
    }
}
