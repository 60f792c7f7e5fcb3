//! # Stitch and Paint
//!
//! Joins two corresponding rings with a band of quads, and closes a single
//! ring with a flat face.
//!
//! ## Face order
//!
//! For ring vertices `a[i]` and `b[i]` the quad is
//!
//! ```text
//! a[i], a[i+k], b[i+k], b[i]      k = +1 or -1
//! ```
//!
//! With counter-clockwise rings and `b` displaced along the rings' normal,
//! `k = +1` faces outward. `forward` selects that orientation; a clockwise
//! declared winding inverts it.

use tracing::trace;

use super::tessellate::Tessellator;
use crate::error::{MeshError, MeshResult};
use crate::mesh::MeshFragment;
use crate::ring::{Ring, Winding};
use crate::transform::Transform;

/// Joins ring `a` to ring `b` with exactly `n` quads.
///
/// The fragment holds `a`'s vertices followed by `b`'s, all passed through
/// `transform`. Collapsed rings are accepted and yield cone-like bands.
///
/// # Errors
///
/// - [`MeshError::CardinalityMismatch`] if the rings differ in size
/// - [`MeshError::InvalidParameter`] if their declared windings differ, or
///   if `transform` produces a non-finite vertex
///
/// # Example
///
/// ```rust
/// use partmesh::{stitch, CircleParams, Transform};
/// use glam::DVec3;
///
/// let params = CircleParams { vertices: 8 };
/// let bottom = params.calc(1.0, 1.0, &Transform::identity()).unwrap();
/// let top = params.calc(1.0, 1.0, &Transform::from_translation(DVec3::Z)).unwrap();
/// let band = stitch(&bottom, &top, true, &Transform::identity()).unwrap();
/// assert_eq!(band.face_count(), 8);
/// ```
pub fn stitch(a: &Ring, b: &Ring, forward: bool, transform: &Transform) -> MeshResult<MeshFragment> {
    check_correspondence(a, b)?;
    let step_forward = forward ^ (a.winding() == Winding::Cw);
    let fragment = stitch_rings(a, b, step_forward, transform);
    fragment.check_finite()?;
    Ok(fragment)
}

/// Closes a ring with a single n-gon.
///
/// With `ccw` the face normal points along the ring's local +Z (the side
/// from which a counter-clockwise declared ring runs counter-clockwise);
/// otherwise it points the other way. Intended for convex rings; see
/// [`paint_tessellated`] for other outlines.
///
/// # Errors
///
/// Returns [`MeshError::DegenerateGeometry`] for a collapsed ring.
pub fn paint(ring: &Ring, ccw: bool, transform: &Transform) -> MeshResult<MeshFragment> {
    if ring.is_collapsed() {
        return Err(MeshError::degenerate("cannot paint a collapsed ring"));
    }

    let n = ring.len() as u32;
    let mut fragment = MeshFragment::with_capacity(ring.len(), 1);
    fragment.add_vertices(&transform.apply_all(ring.vertices()));
    if ccw == (ring.winding() == Winding::Ccw) {
        fragment.add_polygon(0..n);
    } else {
        fragment.add_polygon((0..n).rev());
    }
    fragment.check_finite()?;
    Ok(fragment)
}

/// Closes a possibly non-convex ring with triangles.
///
/// Orientation follows the same rule as [`paint`].
pub fn paint_tessellated(ring: &Ring, ccw: bool, transform: &Transform) -> MeshResult<MeshFragment> {
    if ring.is_collapsed() {
        return Err(MeshError::degenerate("cannot paint a collapsed ring"));
    }

    let mut tessellator = Tessellator::new();
    tessellator.add_polygon(ring, false);
    let tessellation = tessellator.tessellate()?;

    // The tessellation faces along the Newell normal, which is local +Z for
    // counter-clockwise rings and -Z for clockwise ones.
    let along_normal = ccw == (ring.winding() == Winding::Ccw);
    tessellation.fragment(along_normal, transform)
}

// =============================================================================
// INTERNALS
// =============================================================================

pub(crate) fn check_correspondence(a: &Ring, b: &Ring) -> MeshResult<()> {
    if a.len() != b.len() {
        return Err(MeshError::cardinality(a.len(), b.len()));
    }
    if a.winding() != b.winding() {
        return Err(MeshError::invalid_parameter(
            "rings to stitch have opposite declared windings",
        ));
    }
    Ok(())
}

/// Stitches with `k = +1` when `step_forward`, `k = -1` otherwise.
pub(crate) fn stitch_rings(a: &Ring, b: &Ring, step_forward: bool, transform: &Transform) -> MeshFragment {
    let n = a.len();
    let mut fragment = MeshFragment::with_capacity(2 * n, n);
    fragment.add_vertices(&transform.apply_all(a.vertices()));
    fragment.add_vertices(&transform.apply_all(b.vertices()));
    add_band(&mut fragment, 0, n as u32, n, step_forward);
    trace!(vertices = n, step_forward, "stitched rings");
    fragment
}

/// Adds the quads between two rings already present in `fragment`.
pub(crate) fn add_band(fragment: &mut MeshFragment, base_a: u32, base_b: u32, n: usize, step_forward: bool) {
    for i in 0..n {
        let j = if step_forward { (i + 1) % n } else { (i + n - 1) % n };
        let (i, j) = (i as u32, j as u32);
        fragment.add_quad(base_a + i, base_a + j, base_b + j, base_b + i);
    }
}
