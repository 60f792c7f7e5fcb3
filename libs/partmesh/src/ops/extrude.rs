//! # Extrude
//!
//! Sweeps a ring into its successor and emits the connecting band plus
//! optional caps.
//!
//! The successor ring is the `step` transform applied with `pivot` as the
//! origin, so a single step can translate, taper and tilt a ring at once.
//! Chaining extrusions (feeding `next` back in) builds stacks such as a
//! chamfer, draft, body, draft, chamfer package outline.
//!
//! Facing is decided geometrically: sides face away from the swept solid
//! (or into it, for hole walls) whatever the ring's declared winding, and
//! caps always face away from the solid.

use config::constants::EPSILON;
use glam::DVec3;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::stitch::add_band;
use crate::error::{MeshError, MeshResult};
use crate::mesh::MeshFragment;
use crate::ring::Ring;
use crate::transform::Transform;

/// Which side of the swept surface the sides face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facing {
    /// Away from the solid (outer walls)
    #[default]
    Outside,
    /// Into the solid (walls of a hole)
    Inside,
}

/// Parameters for a single extrusion step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtrudeParams {
    /// Close the starting ring
    pub cap_bottom: bool,
    /// Close the resulting ring
    pub cap_top: bool,
    /// Emit the band between the two rings
    pub make_sides: bool,
    /// Origin for the step's scale and rotation
    pub pivot: DVec3,
    /// Maps the starting ring onto the next ring
    pub step: Transform,
    /// Applied to emitted vertices only; `next` stays unplaced
    pub output: Transform,
    pub facing: Facing,
}

impl Default for ExtrudeParams {
    fn default() -> Self {
        Self {
            cap_bottom: false,
            cap_top: false,
            make_sides: true,
            pivot: DVec3::ZERO,
            step: Transform::identity(),
            output: Transform::identity(),
            facing: Facing::Outside,
        }
    }
}

impl ExtrudeParams {
    /// Straight extrusion by `offset` with both caps.
    pub fn solid(offset: DVec3) -> Self {
        Self {
            cap_bottom: true,
            cap_top: true,
            step: Transform::from_translation(offset),
            ..Default::default()
        }
    }

    /// Straight extrusion by `offset` with sides facing inward.
    pub fn hole(offset: DVec3) -> Self {
        Self {
            step: Transform::from_translation(offset),
            facing: Facing::Inside,
            ..Default::default()
        }
    }
}

/// Result of [`extrude`].
#[derive(Debug, Clone, PartialEq)]
pub struct Extrusion {
    /// Emitted geometry, placed by the output transform
    pub fragment: MeshFragment,
    /// The successor ring, ready for the next step
    pub next: Ring,
}

/// Extrudes `ring` by one step.
///
/// # Errors
///
/// Returns [`MeshError::DegenerateGeometry`] if both rings are collapsed, or
/// if a cap is requested on a collapsed ring, and
/// [`MeshError::InvalidParameter`] if the step or output transform produces
/// a non-finite vertex.
///
/// # Example
///
/// ```rust
/// use partmesh::{extrude, CircleParams, ExtrudeParams, Transform};
/// use glam::DVec3;
///
/// let ring = CircleParams::default().calc(1.0, 1.0, &Transform::identity()).unwrap();
/// let result = extrude(&ring, &ExtrudeParams::solid(DVec3::Z)).unwrap();
/// assert_eq!(result.fragment.face_count(), 16 + 2);
/// ```
pub fn extrude(ring: &Ring, params: &ExtrudeParams) -> MeshResult<Extrusion> {
    let next = ring.transformed_about(params.pivot, &params.step)?;

    let reference = [ring.newell_normal(), next.newell_normal()]
        .into_iter()
        .find(|n| n.length() > EPSILON)
        .ok_or_else(|| MeshError::degenerate("extrusion of a collapsed ring into a collapsed ring"))?;

    // In-plane steps (pure scaling) keep the ring's own orientation
    let travel = next.centroid() - ring.centroid();
    let along = {
        let d = travel.dot(reference);
        d.abs() <= EPSILON || d > 0.0
    };
    let outside = params.facing == Facing::Outside;

    let n = ring.len();
    let mut fragment = MeshFragment::with_capacity(2 * n, n + 2);
    fragment.add_vertices(ring.vertices());
    fragment.add_vertices(next.vertices());

    if params.make_sides {
        add_band(&mut fragment, 0, n as u32, n, along == outside);
    }

    if params.cap_bottom {
        if ring.is_collapsed() {
            return Err(MeshError::degenerate("bottom cap on a collapsed ring"));
        }
        add_cap(&mut fragment, 0, n, along != outside);
    }
    if params.cap_top {
        if next.is_collapsed() {
            return Err(MeshError::degenerate("top cap on a collapsed ring"));
        }
        add_cap(&mut fragment, n as u32, n, (along == outside) != params.step.mirrors());
    }

    fragment.transform(&params.output)?;
    if params.output.mirrors() {
        fragment.flip_faces();
    }

    trace!(
        vertices = n,
        sides = params.make_sides,
        cap_bottom = params.cap_bottom,
        cap_top = params.cap_top,
        facing = ?params.facing,
        "extruded ring"
    );

    Ok(Extrusion { fragment, next })
}

/// Runs a chain of steps, feeding each successor ring into the next step.
///
/// Returns one fragment per step and the final ring.
pub fn extrude_chain(ring: &Ring, steps: &[ExtrudeParams]) -> MeshResult<(Vec<MeshFragment>, Ring)> {
    let mut current = ring.clone();
    let mut fragments = Vec::with_capacity(steps.len());
    for params in steps {
        let Extrusion { fragment, next } = extrude(&current, params)?;
        fragments.push(fragment);
        current = next;
    }
    debug!(steps = steps.len(), "extruded chain");
    Ok((fragments, current))
}

fn add_cap(fragment: &mut MeshFragment, base: u32, n: usize, in_order: bool) {
    let indices = (0..n as u32).map(|i| base + i);
    if in_order {
        fragment.add_polygon(indices);
    } else {
        fragment.add_polygon(indices.rev());
    }
}
