//! # Dimple
//!
//! Spherical cap closing a circular opening, used for polarity marks on
//! package tops. The rim lies in local z = 0 and the cap runs on a sphere of
//! radius
//!
//! ```text
//! R = (r^2 + d^2) / (2 |d|)
//! ```
//!
//! down to a pole at z = -d. A positive depth presses the cap into the face
//! below it; a negative depth raises a bump. Either way the faces point
//! toward local +Z.

use config::constants::{DEFAULT_DIMPLE_SECTIONS, MAX_DIMPLE_DEPTH_RATIO, MIN_DIMPLE_SECTIONS, MIN_LENGTH};
use glam::DVec3;
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::stitch::add_band;
use crate::error::{MeshError, MeshResult};
use crate::mesh::MeshFragment;
use crate::ring::{CircleParams, Ring, Winding};
use crate::transform::Transform;

/// Parameters for spherical dimples.
///
/// # Example
///
/// ```rust
/// use partmesh::{DimpleParams, Transform};
///
/// let params = DimpleParams { sides: 12, sections: 4 };
/// let cap = params.calc(0.5, 0.1, &Transform::identity()).unwrap();
/// assert_eq!(cap.face_count(), 12 * 4);
/// let (min, _) = cap.bounding_box();
/// assert!((min.z + 0.1).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DimpleParams {
    /// Vertices around the rim
    pub sides: usize,
    /// Rings from the rim to the pole
    pub sections: usize,
}

impl Default for DimpleParams {
    fn default() -> Self {
        Self {
            sides: CircleParams::default().vertices,
            sections: DEFAULT_DIMPLE_SECTIONS,
        }
    }
}

impl DimpleParams {
    /// Checks the ring counts.
    pub fn validate(&self) -> MeshResult<()> {
        CircleParams { vertices: self.sides }.validate()?;
        if self.sections < MIN_DIMPLE_SECTIONS {
            return Err(MeshError::invalid_parameter(format!(
                "dimple needs at least {MIN_DIMPLE_SECTIONS} sections, got {}",
                self.sections
            )));
        }
        Ok(())
    }

    /// Checks the counts together with a rim radius and depth.
    ///
    /// # Errors
    ///
    /// Fails for invalid counts, a non-positive radius, a depth smaller than
    /// `MIN_LENGTH` in magnitude, or a depth beyond `MAX_DIMPLE_DEPTH_RATIO`
    /// times the radius.
    pub fn check(&self, radius: f64, depth: f64) -> MeshResult<()> {
        self.validate()?;
        if !(radius > 0.0) || !radius.is_finite() {
            return Err(MeshError::invalid_parameter(format!(
                "dimple radius must be positive, got {radius}"
            )));
        }
        if !(depth.abs() >= MIN_LENGTH) || !depth.is_finite() {
            return Err(MeshError::invalid_parameter(format!(
                "dimple depth must be at least {MIN_LENGTH} in magnitude, got {depth}"
            )));
        }
        if depth.abs() > MAX_DIMPLE_DEPTH_RATIO * radius {
            return Err(MeshError::invalid_parameter(format!(
                "dimple depth {depth} exceeds {MAX_DIMPLE_DEPTH_RATIO} times the radius {radius}"
            )));
        }
        Ok(())
    }

    /// Rings from the rim (first) to the pole (last, collapsed), each
    /// starting at +X and running counter-clockwise, passed through
    /// `transform`.
    pub fn rings(&self, radius: f64, depth: f64, transform: &Transform) -> MeshResult<Vec<Ring>> {
        self.check(radius, depth)?;
        let rim = CircleParams { vertices: self.sides }.calc(radius, radius, &Transform::identity())?;

        let (sphere, rim_angle) = sphere_geometry(radius, depth.abs());
        let sign = depth.signum();
        let mut rings = Vec::with_capacity(self.sections + 1);
        for k in 0..=self.sections {
            let theta = rim_angle * (1.0 - k as f64 / self.sections as f64);
            let spread = theta.sin() / rim_angle.sin();
            let z = sign * (sphere * (1.0 - theta.cos()) - depth.abs());
            let vertices = rim
                .iter()
                .map(|v| transform.apply(DVec3::new(v.x * spread, v.y * spread, z)))
                .collect();
            rings.push(Ring::new(vertices, Winding::Ccw)?);
        }
        Ok(rings)
    }

    /// Builds the cap as one fragment: quads between consecutive rings and a
    /// triangle fan around the pole.
    ///
    /// # Errors
    ///
    /// See [`check`](Self::check); also fails if `transform` produces a
    /// non-finite vertex.
    pub fn calc(&self, radius: f64, depth: f64, transform: &Transform) -> MeshResult<MeshFragment> {
        let rings = self.rings(radius, depth, transform)?;
        let n = self.sides;
        let mut fragment = MeshFragment::with_capacity(self.sections * n + 1, self.sections * n);

        for ring in &rings[..self.sections] {
            fragment.add_vertices(ring.vertices());
        }
        let pole = fragment.add_vertex(rings[self.sections].vertex(0));

        for k in 1..self.sections {
            add_band(&mut fragment, ((k - 1) * n) as u32, (k * n) as u32, n, true);
        }
        let last = ((self.sections - 1) * n) as u32;
        for i in 0..n {
            let j = (i + 1) % n;
            fragment.add_triangle(last + i as u32, last + j as u32, pole);
        }

        trace!(sides = n, sections = self.sections, radius, depth, "dimple");
        Ok(fragment)
    }
}

/// Radius of the sphere whose cap spans a rim of `radius` at `depth`.
pub fn sphere_radius(radius: f64, depth: f64) -> f64 {
    (radius * radius + depth * depth) / (2.0 * depth.abs())
}

/// Sphere radius and the polar angle of the rim seen from the center.
fn sphere_geometry(radius: f64, depth: f64) -> (f64, f64) {
    let sphere = sphere_radius(radius, depth);
    (sphere, radius.atan2(sphere - depth))
}
