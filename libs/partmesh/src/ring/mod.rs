//! # Profile Rings
//!
//! Closed cross-section outlines and the primitives that generate them.
//!
//! ## Primitives
//!
//! - [`CircleParams`]: ellipse/circle approximated by evenly spaced vertices
//! - [`RectangleParams`]: rectangle with optional beveled corners
//! - [`SimplePoly`]: free polygon built vertex by vertex
//!
//! Every primitive returns the same vertex parametrization for the same
//! parameters, so two rings built with equal parameters correspond
//! index-by-index and can be stitched.

mod circle;
mod rectangle;
mod simple_poly;

#[cfg(test)]
mod tests;

pub use circle::CircleParams;
pub use rectangle::RectangleParams;
pub use simple_poly::SimplePoly;

use config::constants::{EPSILON, MIN_RING_VERTICES, VERTEX_MERGE_EPSILON};
use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::error::{MeshError, MeshResult};
use crate::transform::Transform;

/// Declared vertex order about a profile's local +Z at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Winding {
    /// Counter-clockwise seen from +Z
    #[default]
    Ccw,
    /// Clockwise seen from +Z
    Cw,
}

impl Winding {
    /// Returns the opposite winding.
    pub fn reversed(self) -> Self {
        match self {
            Winding::Ccw => Winding::Cw,
            Winding::Cw => Winding::Ccw,
        }
    }
}

/// An ordered closed ring of at least three finite vertices.
///
/// A ring whose vertices all coincide (for example after a zero scale) is
/// legal and called *collapsed*; it closes cones and tapered tips.
#[derive(Debug, Clone, PartialEq)]
pub struct Ring {
    vertices: Vec<DVec3>,
    winding: Winding,
}

impl Ring {
    /// Creates a ring from vertices and their declared winding.
    ///
    /// # Errors
    ///
    /// Fails with fewer than three vertices or a non-finite coordinate.
    pub fn new(vertices: Vec<DVec3>, winding: Winding) -> MeshResult<Self> {
        if vertices.len() < MIN_RING_VERTICES {
            return Err(MeshError::degenerate(format!(
                "ring needs at least {MIN_RING_VERTICES} vertices, got {}",
                vertices.len()
            )));
        }
        if let Some(bad) = vertices.iter().find(|v| !v.is_finite()) {
            return Err(MeshError::invalid_parameter(format!(
                "ring vertex is not finite: {bad}"
            )));
        }
        Ok(Self { vertices, winding })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Always false; kept for API symmetry with `len`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    #[inline]
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    #[inline]
    pub fn vertex(&self, index: usize) -> DVec3 {
        self.vertices[index]
    }

    #[inline]
    pub fn winding(&self) -> Winding {
        self.winding
    }

    pub fn iter(&self) -> impl Iterator<Item = &DVec3> {
        self.vertices.iter()
    }

    /// Returns the ring with every vertex transformed. The declared winding
    /// is kept, so index correspondence survives.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::InvalidParameter`] if a transformed vertex is not
    /// finite.
    pub fn transformed(&self, transform: &Transform) -> MeshResult<Ring> {
        Ring::new(transform.apply_all(&self.vertices), self.winding)
    }

    /// Applies `transform` with `pivot` as the origin for scale and rotation.
    ///
    /// `p' = pivot + R * (S * (p - pivot)) + T`
    pub fn transformed_about(&self, pivot: DVec3, transform: &Transform) -> MeshResult<Ring> {
        let vertices = self
            .vertices
            .iter()
            .map(|p| transform.apply(*p - pivot) + pivot)
            .collect();
        Ring::new(vertices, self.winding)
    }

    /// Returns the ring traversed in the opposite direction.
    pub fn reversed(&self) -> Ring {
        let mut vertices = self.vertices.clone();
        vertices.reverse();
        Ring {
            vertices,
            winding: self.winding.reversed(),
        }
    }

    /// Average of the vertices.
    pub fn centroid(&self) -> DVec3 {
        self.vertices.iter().copied().sum::<DVec3>() / self.vertices.len() as f64
    }

    /// Newell normal: points along the side from which the ring runs
    /// counter-clockwise; its length is twice the enclosed area.
    pub fn newell_normal(&self) -> DVec3 {
        let n = self.vertices.len();
        (0..n)
            .map(|i| self.vertices[i].cross(self.vertices[(i + 1) % n]))
            .sum()
    }

    /// Enclosed area of the (planar) ring.
    pub fn area(&self) -> f64 {
        self.newell_normal().length() * 0.5
    }

    /// Returns true if all vertices coincide within the merge tolerance.
    pub fn is_collapsed(&self) -> bool {
        let first = self.vertices[0];
        self.vertices
            .iter()
            .all(|v| v.distance(first) < VERTEX_MERGE_EPSILON)
    }

    /// Returns true if every vertex lies on the plane of the Newell normal.
    pub fn is_planar(&self) -> bool {
        let normal = self.newell_normal();
        if normal.length() < EPSILON {
            return true;
        }
        let normal = normal.normalize();
        let origin = self.centroid();
        let extent = self
            .vertices
            .iter()
            .map(|v| v.distance(origin))
            .fold(0.0, f64::max);
        self.vertices
            .iter()
            .all(|v| (*v - origin).dot(normal).abs() <= VERTEX_MERGE_EPSILON.max(extent * 1e-9))
    }
}
