//! # Mesh Fragment
//!
//! Polygon mesh produced by a single geometry operation.

use config::constants::{MAX_VERTICES, MIN_TRIANGLE_AREA};
use glam::DVec3;

use crate::error::{MeshError, MeshResult};
use crate::transform::Transform;

/// A polygon mesh with its own vertex list.
///
/// Faces are triangles, quads or n-gons given as indices into the
/// fragment's vertices. A fragment is owned by the caller that built it and
/// is consumed by the scene writer.
///
/// # Example
///
/// ```rust
/// use partmesh::MeshFragment;
/// use glam::DVec3;
///
/// let mut fragment = MeshFragment::new();
/// fragment.add_vertex(DVec3::new(0.0, 0.0, 0.0));
/// fragment.add_vertex(DVec3::new(1.0, 0.0, 0.0));
/// fragment.add_vertex(DVec3::new(0.0, 1.0, 0.0));
/// fragment.add_triangle(0, 1, 2);
/// assert!(fragment.validate());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshFragment {
    vertices: Vec<DVec3>,
    faces: Vec<Vec<u32>>,
}

impl MeshFragment {
    /// Creates an empty fragment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a fragment with pre-allocated capacity.
    pub fn with_capacity(vertex_count: usize, face_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            faces: Vec::with_capacity(face_count),
        }
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Returns true if the fragment has no faces.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Adds a vertex and returns its index.
    pub fn add_vertex(&mut self, position: DVec3) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(position);
        index
    }

    /// Adds a run of vertices and returns the index of the first one.
    pub fn add_vertices(&mut self, positions: &[DVec3]) -> u32 {
        let base = self.vertices.len() as u32;
        self.vertices.extend_from_slice(positions);
        base
    }

    pub fn add_triangle(&mut self, v0: u32, v1: u32, v2: u32) {
        self.faces.push(vec![v0, v1, v2]);
    }

    pub fn add_quad(&mut self, v0: u32, v1: u32, v2: u32, v3: u32) {
        self.faces.push(vec![v0, v1, v2, v3]);
    }

    /// Adds an n-gon face.
    pub fn add_polygon(&mut self, indices: impl IntoIterator<Item = u32>) {
        self.faces.push(indices.into_iter().collect());
    }

    #[inline]
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    #[inline]
    pub fn faces(&self) -> &[Vec<u32>] {
        &self.faces
    }

    #[inline]
    pub fn vertex(&self, index: u32) -> DVec3 {
        self.vertices[index as usize]
    }

    #[inline]
    pub fn face(&self, index: usize) -> &[u32] {
        &self.faces[index]
    }

    /// Total number of indices over all faces.
    pub fn index_count(&self) -> usize {
        self.faces.iter().map(Vec::len).sum()
    }

    /// Newell normal of a face, scaled by twice its area.
    pub fn face_normal(&self, index: usize) -> DVec3 {
        let face = &self.faces[index];
        let mut normal = DVec3::ZERO;
        for (k, &i) in face.iter().enumerate() {
            let current = self.vertices[i as usize];
            let next = self.vertices[face[(k + 1) % face.len()] as usize];
            normal += current.cross(next);
        }
        normal
    }

    /// Computes the axis-aligned bounding box.
    ///
    /// Returns (min, max) corners of the bounding box.
    pub fn bounding_box(&self) -> (DVec3, DVec3) {
        if self.vertices.is_empty() {
            return (DVec3::ZERO, DVec3::ZERO);
        }

        let mut min = self.vertices[0];
        let mut max = self.vertices[0];

        for v in &self.vertices[1..] {
            min = min.min(*v);
            max = max.max(*v);
        }

        (min, max)
    }

    /// Applies a transform to every vertex. Face winding is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::InvalidParameter`] if a transformed vertex is not
    /// finite.
    pub fn transform(&mut self, transform: &Transform) -> MeshResult<()> {
        for v in &mut self.vertices {
            *v = transform.apply(*v);
        }
        self.check_finite()
    }

    /// Translates the fragment by a vector.
    pub fn translate(&mut self, offset: DVec3) {
        for v in &mut self.vertices {
            *v += offset;
        }
    }

    /// Reverses the vertex order of every face.
    pub fn flip_faces(&mut self) {
        for face in &mut self.faces {
            face.reverse();
        }
    }

    /// Merges another fragment into this one.
    pub fn merge(&mut self, other: &MeshFragment) {
        let offset = self.vertices.len() as u32;

        self.vertices.extend_from_slice(&other.vertices);

        for face in &other.faces {
            self.faces.push(face.iter().map(|i| i + offset).collect());
        }
    }

    /// Appends the faces of `other`, offsetting its indices by `base`.
    ///
    /// Used when `other` was built from vertices this fragment already holds
    /// starting at `base`; no vertices are copied.
    pub fn append_faces(&mut self, other: &MeshFragment, base: u32) {
        for face in &other.faces {
            self.faces.push(face.iter().map(|i| i + base).collect());
        }
    }

    /// Fails if any vertex is NaN or infinite.
    pub fn check_finite(&self) -> MeshResult<()> {
        match self.vertices.iter().position(|v| !v.is_finite()) {
            Some(index) => Err(MeshError::invalid_parameter(format!(
                "vertex {index} is not finite: {}",
                self.vertices[index]
            ))),
            None => Ok(()),
        }
    }

    /// Fails if the fragment exceeds [`MAX_VERTICES`].
    pub fn check_limits(&self) -> MeshResult<()> {
        if self.vertices.len() > MAX_VERTICES {
            return Err(MeshError::TooManyVertices {
                count: self.vertices.len(),
                max: MAX_VERTICES,
            });
        }
        Ok(())
    }

    /// Validates the fragment for correctness.
    ///
    /// Checks:
    /// - Every face has at least three indices, all in range
    /// - No face repeats an index
    /// - Every vertex is finite
    ///
    /// Zero-area faces are allowed: stitching a collapsed ring yields them.
    pub fn validate(&self) -> bool {
        let vertex_count = self.vertices.len() as u32;

        if self.vertices.iter().any(|v| !v.is_finite()) {
            return false;
        }

        for face in &self.faces {
            if face.len() < 3 || face.iter().any(|&i| i >= vertex_count) {
                return false;
            }
            for (k, i) in face.iter().enumerate() {
                if face[k + 1..].contains(i) {
                    return false;
                }
            }
        }

        true
    }

    /// Counts faces whose area is below [`MIN_TRIANGLE_AREA`].
    pub fn degenerate_face_count(&self) -> usize {
        (0..self.faces.len())
            .filter(|&i| self.face_normal(i).length() < MIN_TRIANGLE_AREA)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_triangle() -> MeshFragment {
        let mut fragment = MeshFragment::new();
        fragment.add_vertex(DVec3::ZERO);
        fragment.add_vertex(DVec3::X);
        fragment.add_vertex(DVec3::Y);
        fragment.add_triangle(0, 1, 2);
        fragment
    }

    #[test]
    fn test_fragment_new() {
        let fragment = MeshFragment::new();
        assert!(fragment.is_empty());
        assert_eq!(fragment.vertex_count(), 0);
        assert_eq!(fragment.face_count(), 0);
    }

    #[test]
    fn test_fragment_add_vertices_returns_base() {
        let mut fragment = MeshFragment::new();
        fragment.add_vertex(DVec3::ZERO);
        let base = fragment.add_vertices(&[DVec3::X, DVec3::Y]);
        assert_eq!(base, 1);
        assert_eq!(fragment.vertex_count(), 3);
    }

    #[test]
    fn test_fragment_polygon_faces() {
        let mut fragment = MeshFragment::new();
        fragment.add_vertices(&[DVec3::ZERO, DVec3::X, DVec3::new(1.0, 1.0, 0.0), DVec3::Y]);
        fragment.add_quad(0, 1, 2, 3);
        fragment.add_polygon([0, 2, 3]);
        assert_eq!(fragment.face_count(), 2);
        assert_eq!(fragment.index_count(), 7);
        assert!(fragment.validate());
    }

    #[test]
    fn test_face_normal_follows_winding() {
        let fragment = unit_triangle();
        let normal = fragment.face_normal(0);
        assert!(normal.z > 0.0);
        assert!((normal.length() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_flip_faces() {
        let mut fragment = unit_triangle();
        fragment.flip_faces();
        assert_eq!(fragment.face(0), &[2, 1, 0]);
        assert!(fragment.face_normal(0).z < 0.0);
    }

    #[test]
    fn test_fragment_bounding_box() {
        let mut fragment = MeshFragment::new();
        fragment.add_vertex(DVec3::new(-1.0, -2.0, -3.0));
        fragment.add_vertex(DVec3::new(4.0, 5.0, 6.0));
        let (min, max) = fragment.bounding_box();
        assert_eq!(min, DVec3::new(-1.0, -2.0, -3.0));
        assert_eq!(max, DVec3::new(4.0, 5.0, 6.0));
    }

    #[test]
    fn test_fragment_validate_invalid_index() {
        let mut fragment = MeshFragment::new();
        fragment.add_vertex(DVec3::ZERO);
        fragment.add_triangle(0, 1, 2);
        assert!(!fragment.validate());
    }

    #[test]
    fn test_fragment_validate_repeated_index() {
        let mut fragment = unit_triangle();
        fragment.add_triangle(0, 1, 0);
        assert!(!fragment.validate());
    }

    #[test]
    fn test_fragment_validate_non_finite() {
        let mut fragment = unit_triangle();
        fragment.add_vertex(DVec3::new(f64::NAN, 0.0, 0.0));
        assert!(!fragment.validate());
    }

    #[test]
    fn test_fragment_transform() {
        let mut fragment = unit_triangle();
        fragment.transform(&Transform::from_translation(DVec3::Z)).unwrap();
        assert_eq!(fragment.vertex(0), DVec3::Z);
        fragment.translate(DVec3::X);
        assert_eq!(fragment.vertex(0), DVec3::new(1.0, 0.0, 1.0));
    }

    #[test]
    fn test_fragment_merge() {
        let mut first = unit_triangle();
        let second = unit_triangle();
        first.merge(&second);
        assert_eq!(first.vertex_count(), 6);
        assert_eq!(first.face_count(), 2);
        assert_eq!(first.face(1), &[3, 4, 5]);
    }

    #[test]
    fn test_fragment_append_faces_shares_vertices() {
        let mut fragment = unit_triangle();
        fragment.add_vertices(&[DVec3::Z, DVec3::new(1.0, 0.0, 1.0), DVec3::new(0.0, 1.0, 1.0)]);
        let mut cap = MeshFragment::new();
        cap.add_vertices(&[DVec3::Z, DVec3::new(1.0, 0.0, 1.0), DVec3::new(0.0, 1.0, 1.0)]);
        cap.add_triangle(0, 1, 2);
        fragment.append_faces(&cap, 3);
        assert_eq!(fragment.vertex_count(), 6);
        assert_eq!(fragment.face(1), &[3, 4, 5]);
    }

    #[test]
    fn test_degenerate_face_count() {
        let mut fragment = unit_triangle();
        fragment.add_vertex(DVec3::new(2.0, 0.0, 0.0));
        fragment.add_triangle(0, 1, 3);
        assert_eq!(fragment.degenerate_face_count(), 1);
    }

    #[test]
    fn test_transform_rejects_non_finite_result() {
        let mut fragment = unit_triangle();
        let result = fragment.transform(&Transform::from_translation(DVec3::new(f64::INFINITY, 0.0, 0.0)));
        assert!(matches!(result, Err(MeshError::InvalidParameter { .. })));
        assert!(unit_triangle().check_finite().is_ok());
    }

    #[test]
    fn test_check_limits() {
        assert!(unit_triangle().check_limits().is_ok());
    }
}
