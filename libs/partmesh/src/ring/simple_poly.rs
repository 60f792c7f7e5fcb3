//! # Simple Polygon
//!
//! Free-form rings built vertex by vertex, such as pin cross sections and
//! composite outlines.

use config::constants::VERTEX_MERGE_EPSILON;
use glam::DVec3;

use super::{Ring, Winding};
use crate::error::MeshResult;

/// Builder for arbitrary rings.
///
/// Consecutive duplicate vertices (within the merge tolerance) are skipped,
/// as is a final vertex repeating the first.
///
/// # Example
///
/// ```rust
/// use partmesh::SimplePoly;
///
/// let ring = SimplePoly::new()
///     .add_vertex(0.0, 0.0, 0.0)
///     .add_vertex(1.0, 0.0, 0.0)
///     .add_vertex(1.0, 0.0, 0.0)
///     .add_vertex(0.0, 1.0, 0.0)
///     .build()
///     .unwrap();
/// assert_eq!(ring.len(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SimplePoly {
    vertices: Vec<DVec3>,
    winding: Winding,
}

impl SimplePoly {
    /// Creates an empty polygon with counter-clockwise winding.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from the vertices and winding of an existing ring.
    pub fn from_ring(ring: &Ring) -> Self {
        Self::new().with_winding(ring.winding()).append_ring(ring)
    }

    /// Appends a vertex.
    pub fn add_vertex(mut self, x: f64, y: f64, z: f64) -> Self {
        self.push_vertex(DVec3::new(x, y, z));
        self
    }

    /// Appends a vertex in place.
    pub fn push_vertex(&mut self, vertex: DVec3) {
        let duplicate = self
            .vertices
            .last()
            .is_some_and(|last| last.distance(vertex) < VERTEX_MERGE_EPSILON);
        if !duplicate {
            self.vertices.push(vertex);
        }
    }

    /// Concatenates the vertices of another contour.
    pub fn append_ring(mut self, ring: &Ring) -> Self {
        for v in ring.iter() {
            self.push_vertex(*v);
        }
        self
    }

    /// Declares the winding of the finished ring.
    pub fn with_winding(mut self, winding: Winding) -> Self {
        self.winding = winding;
        self
    }

    /// Number of vertices accepted so far.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Finishes the ring.
    ///
    /// # Errors
    ///
    /// Fails if fewer than three distinct vertices remain or any coordinate
    /// is not finite.
    pub fn build(mut self) -> MeshResult<Ring> {
        while self.vertices.len() > 1 {
            let first = self.vertices[0];
            match self.vertices.last() {
                Some(last) if last.distance(first) < VERTEX_MERGE_EPSILON => {
                    self.vertices.pop();
                }
                _ => break,
            }
        }
        Ring::new(self.vertices, self.winding)
    }
}
