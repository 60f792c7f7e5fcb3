//! # Cap Tessellation
//!
//! Triangulates a planar outline with holes, such as a connector face with
//! one opening per pin.
//!
//! ## Algorithm
//!
//! 1. Project every contour onto the plane of the outer ring's Newell normal
//! 2. Normalize windings: outer counter-clockwise, holes clockwise
//! 3. Ear clipping with hole bridging (`earcutr`)
//! 4. Re-orient each triangle with `robust::orient2d`, dropping slivers
//!
//! Boundary vertices appear once in the output; no Steiner points are added.

use config::constants::MIN_TRIANGLE_AREA;
use glam::{DVec2, DVec3};
use robust::{orient2d, Coord};
use tracing::{debug, warn};

use crate::error::{MeshError, MeshResult};
use crate::mesh::MeshFragment;
use crate::ring::Ring;
use crate::transform::Transform;

/// Collects one outer boundary and any number of holes.
///
/// # Example
///
/// ```rust
/// use partmesh::{CircleParams, RectangleParams, Tessellator, Transform};
///
/// let identity = Transform::identity();
/// let outer = RectangleParams::default().calc(4.0, 4.0, &identity).unwrap();
/// let hole = CircleParams::default().calc(1.0, 1.0, &identity).unwrap();
///
/// let mut tessellator = Tessellator::new();
/// tessellator.add_polygon(&outer, false);
/// tessellator.add_polygon(&hole, true);
/// let tessellation = tessellator.tessellate().unwrap();
/// assert_eq!(tessellation.vertices().len(), 4 + 16);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Tessellator {
    outers: Vec<Vec<DVec3>>,
    holes: Vec<Vec<DVec3>>,
}

/// Triangulated cap: boundary vertices and counter-clockwise triangles
/// (seen from the tip of [`Tessellation::normal`]).
#[derive(Debug, Clone, PartialEq)]
pub struct Tessellation {
    vertices: Vec<DVec3>,
    triangles: Vec<[u32; 3]>,
    normal: DVec3,
}

impl Tessellator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a contour. Its winding is normalized during tessellation, so the
    /// declared winding does not matter.
    pub fn add_polygon(&mut self, ring: &Ring, is_hole: bool) {
        let contour = ring.vertices().to_vec();
        if is_hole {
            self.holes.push(contour);
        } else {
            self.outers.push(contour);
        }
    }

    pub fn hole_count(&self) -> usize {
        self.holes.len()
    }

    /// Removes all contours.
    pub fn clear(&mut self) {
        self.outers.clear();
        self.holes.clear();
    }

    /// Triangulates the collected contours.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::Tessellation`] when there is no outer boundary,
    /// more than one, the outline has zero area, a hole has zero area, or
    /// the triangulator fails.
    pub fn tessellate(&self) -> MeshResult<Tessellation> {
        let outer = match self.outers.as_slice() {
            [] => return Err(MeshError::tessellation("no outer boundary")),
            [outer] => outer,
            many => {
                return Err(MeshError::tessellation(format!(
                    "expected one outer boundary, got {}",
                    many.len()
                )))
            }
        };

        let normal = newell(outer);
        if normal.length() * 0.5 < MIN_TRIANGLE_AREA {
            return Err(MeshError::tessellation("outer boundary has zero area"));
        }
        let normal = normal.normalize();
        let u = normal.any_orthonormal_vector();
        let v = normal.cross(u);
        let project = |p: &DVec3| DVec2::new(p.dot(u), p.dot(v));

        let mut vertices: Vec<DVec3> = Vec::with_capacity(
            outer.len() + self.holes.iter().map(Vec::len).sum::<usize>(),
        );
        let mut flat: Vec<DVec2> = Vec::with_capacity(vertices.capacity());
        let mut hole_starts = Vec::with_capacity(self.holes.len());

        push_contour(&mut vertices, &mut flat, outer, &project, true)?;
        for hole in &self.holes {
            hole_starts.push(flat.len());
            push_contour(&mut vertices, &mut flat, hole, &project, false)?;
        }

        let coords: Vec<f64> = flat.iter().flat_map(|p| [p.x, p.y]).collect();
        let indices = earcutr::earcut(&coords, &hole_starts, 2)
            .map_err(|e| MeshError::tessellation(format!("ear clipping failed: {e:?}")))?;

        let mut triangles = Vec::with_capacity(indices.len() / 3);
        let mut dropped = 0usize;
        for tri in indices.chunks_exact(3) {
            let (a, b, c) = (tri[0], tri[1], tri[2]);
            let orientation = orient2d(coord(flat[a]), coord(flat[b]), coord(flat[c]));
            if orientation.abs() <= MIN_TRIANGLE_AREA {
                dropped += 1;
                continue;
            }
            if orientation > 0.0 {
                triangles.push([a as u32, b as u32, c as u32]);
            } else {
                triangles.push([a as u32, c as u32, b as u32]);
            }
        }

        if dropped > 0 {
            warn!(dropped, "dropped zero-area cap triangles");
        }
        if triangles.is_empty() {
            return Err(MeshError::tessellation("outline produced no triangles"));
        }

        debug!(
            vertices = vertices.len(),
            holes = self.holes.len(),
            triangles = triangles.len(),
            "tessellated cap"
        );

        Ok(Tessellation {
            vertices,
            triangles,
            normal,
        })
    }
}

impl Tessellation {
    #[inline]
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    #[inline]
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    /// Unit normal of the outer boundary.
    #[inline]
    pub fn normal(&self) -> DVec3 {
        self.normal
    }

    /// Sum of the triangle areas.
    pub fn area(&self) -> f64 {
        self.triangles
            .iter()
            .map(|t| {
                let [a, b, c] = t.map(|i| self.vertices[i as usize]);
                (b - a).cross(c - a).length() * 0.5
            })
            .sum()
    }

    /// Builds a mesh fragment.
    ///
    /// With `ccw` the triangles face along [`Tessellation::normal`];
    /// otherwise they face the opposite way. `transform` is applied to the
    /// emitted vertices.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::InvalidParameter`] if `transform` produces a
    /// non-finite vertex.
    pub fn fragment(&self, ccw: bool, transform: &Transform) -> MeshResult<MeshFragment> {
        let mut fragment = MeshFragment::with_capacity(self.vertices.len(), self.triangles.len());
        fragment.add_vertices(&transform.apply_all(&self.vertices));
        for &[a, b, c] in &self.triangles {
            if ccw {
                fragment.add_triangle(a, b, c);
            } else {
                fragment.add_triangle(a, c, b);
            }
        }
        fragment.check_finite()?;
        Ok(fragment)
    }
}

// =============================================================================
// HELPERS
// =============================================================================

fn newell(contour: &[DVec3]) -> DVec3 {
    let n = contour.len();
    (0..n).map(|i| contour[i].cross(contour[(i + 1) % n])).sum()
}

fn signed_area(points: &[DVec2]) -> f64 {
    let n = points.len();
    (0..n)
        .map(|i| points[i].perp_dot(points[(i + 1) % n]))
        .sum::<f64>()
        * 0.5
}

#[inline]
fn coord(p: DVec2) -> Coord<f64> {
    Coord { x: p.x, y: p.y }
}

/// Appends a contour wound counter-clockwise (`ccw`) or clockwise.
fn push_contour(
    vertices: &mut Vec<DVec3>,
    flat: &mut Vec<DVec2>,
    contour: &[DVec3],
    project: &impl Fn(&DVec3) -> DVec2,
    ccw: bool,
) -> MeshResult<()> {
    let projected: Vec<DVec2> = contour.iter().map(project).collect();
    let area = signed_area(&projected);
    if area.abs() < MIN_TRIANGLE_AREA {
        return Err(MeshError::tessellation(if ccw {
            "outer boundary has zero area in its plane"
        } else {
            "hole has zero area"
        }));
    }

    if (area > 0.0) == ccw {
        vertices.extend_from_slice(contour);
        flat.extend(projected);
    } else {
        vertices.extend(contour.iter().rev());
        flat.extend(projected.into_iter().rev());
    }
    Ok(())
}
