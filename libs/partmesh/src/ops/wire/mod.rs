//! # Wire Sweep
//!
//! Sweeps a cross-section ring along a polyline whose corners are rounded
//! into circular bends, as used for pins, leads and coil windings.
//!
//! ## Path preparation
//!
//! 1. Consecutive duplicate points are collapsed
//! 2. Interior points on a straight line are dropped
//! 3. Each remaining interior point becomes an arc of radius `bend_radius`,
//!    tangent to both neighbouring segments
//!
//! The cross section is defined in its local XY plane and travels along its
//! local +Z. It is carried along the path with a rotation-minimizing frame,
//! so it never twists about the tangent.

use std::f64::consts::{FRAC_PI_2, PI};

use config::constants::{
    DEFAULT_BEND_RADIUS, DEFAULT_BEND_SEGMENTS, MAX_BEND_SEGMENTS, MAX_VERTICES, MIN_BEND_RADIUS,
    MIN_BEND_SEGMENTS, STRAIGHT_ANGLE_EPSILON, VERTEX_MERGE_EPSILON,
};
use glam::{DQuat, DVec3};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::stitch::{add_band, paint, stitch_rings};
use crate::error::{MeshError, MeshResult};
use crate::mesh::MeshFragment;
use crate::ring::{Ring, Winding};
use crate::transform::Transform;

// =============================================================================
// PARAMETERS
// =============================================================================

/// Bend resolution and radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WireParams {
    /// Sub-segments for a 90 degree bend; smaller bends get proportionally
    /// fewer, never less than one
    pub segments_per_bend: u32,
    /// Centerline radius of every bend
    pub bend_radius: f64,
}

impl Default for WireParams {
    fn default() -> Self {
        Self {
            segments_per_bend: DEFAULT_BEND_SEGMENTS,
            bend_radius: DEFAULT_BEND_RADIUS,
        }
    }
}

impl WireParams {
    pub fn validate(&self) -> MeshResult<()> {
        if !(MIN_BEND_SEGMENTS..=MAX_BEND_SEGMENTS).contains(&self.segments_per_bend) {
            return Err(MeshError::invalid_parameter(format!(
                "bend segments must be in {MIN_BEND_SEGMENTS}..={MAX_BEND_SEGMENTS}, got {}",
                self.segments_per_bend
            )));
        }
        if !(self.bend_radius >= MIN_BEND_RADIUS) || !self.bend_radius.is_finite() {
            return Err(MeshError::invalid_parameter(format!(
                "bend radius must be positive, got {}",
                self.bend_radius
            )));
        }
        Ok(())
    }

    /// Sub-segments used for a bend of `angle` radians.
    pub fn subdivisions(&self, angle: f64) -> u32 {
        // Tolerate rounding so an exact right angle maps to segments_per_bend
        let scaled = (angle / FRAC_PI_2 * self.segments_per_bend as f64 - 1e-9).ceil();
        (scaled.max(1.0)) as u32
    }
}

/// Output options for [`Wire::build`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WireBuildOptions {
    /// Close the first ring
    pub cap_start: bool,
    /// Close the last ring
    pub cap_end: bool,
    /// Share joint rings in a single fragment instead of emitting one
    /// fragment per swept segment
    pub weld_ends: bool,
    /// Applied to every emitted vertex
    pub transform: Transform,
}

impl Default for WireBuildOptions {
    fn default() -> Self {
        Self {
            cap_start: true,
            cap_end: true,
            weld_ends: true,
            transform: Transform::identity(),
        }
    }
}

/// A point on the prepared centerline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathSample {
    pub position: DVec3,
    /// Unit direction of travel
    pub tangent: DVec3,
}

/// The prepared centerline: samples and total length.
#[derive(Debug, Clone, PartialEq)]
pub struct Centerline {
    pub samples: Vec<PathSample>,
    /// Straight lengths plus arc lengths
    pub length: f64,
}

/// Result of [`Wire::build`].
#[derive(Debug, Clone, PartialEq)]
pub struct WireSweep {
    /// With `weld_ends`, one fragment. Otherwise the start cap (if any),
    /// one fragment per segment, then the end cap (if any).
    pub fragments: Vec<MeshFragment>,
    pub length: f64,
}

// =============================================================================
// WIRE
// =============================================================================

/// A polyline to sweep.
///
/// # Example
///
/// ```rust
/// use partmesh::{CircleParams, Transform, Wire, WireBuildOptions, WireParams};
///
/// let mut wire = Wire::new(WireParams::default()).unwrap();
/// wire.add_point(0.0, 0.0, 0.0).unwrap();
/// wire.add_point(0.0, 0.0, 5.0).unwrap();
/// wire.add_point(5.0, 0.0, 5.0).unwrap();
///
/// let section = CircleParams { vertices: 8 }
///     .calc(0.2, 0.2, &Transform::identity())
///     .unwrap();
/// let sweep = wire.build(&section, &WireBuildOptions::default()).unwrap();
/// assert_eq!(sweep.fragments.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Wire {
    params: WireParams,
    points: Vec<DVec3>,
}

impl Wire {
    pub fn new(params: WireParams) -> MeshResult<Self> {
        params.validate()?;
        Ok(Self {
            params,
            points: Vec::new(),
        })
    }

    #[inline]
    pub fn params(&self) -> &WireParams {
        &self.params
    }

    /// Appends a path point.
    pub fn add_point(&mut self, x: f64, y: f64, z: f64) -> MeshResult<()> {
        let point = DVec3::new(x, y, z);
        if !point.is_finite() {
            return Err(MeshError::invalid_parameter(format!(
                "wire point is not finite: {point}"
            )));
        }
        self.points.push(point);
        Ok(())
    }

    /// Removes all points, keeping the parameters.
    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Number of points added (before simplification).
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn points(&self) -> &[DVec3] {
        &self.points
    }

    /// Prepares the centerline: simplifies the polyline and rounds its
    /// corners.
    ///
    /// # Errors
    ///
    /// - [`MeshError::DegenerateGeometry`] if fewer than two distinct points
    /// - [`MeshError::InvalidParameter`] if the path doubles back on itself or a
    ///   segment is too short to hold the bends at both of its ends
    pub fn centerline(&self) -> MeshResult<Centerline> {
        let points = simplify(&self.points)?;
        let m = points.len();
        let radius = self.params.bend_radius;

        let directions: Vec<DVec3> = points.windows(2).map(|w| (w[1] - w[0]).normalize()).collect();
        let lengths: Vec<f64> = points.windows(2).map(|w| w[1].distance(w[0])).collect();

        // Bend angle and tangent distance per point; zero at both ends
        let mut angles = vec![0.0; m];
        let mut tangents = vec![0.0; m];
        for k in 1..m - 1 {
            angles[k] = directions[k - 1].angle_between(directions[k]);
            tangents[k] = radius * (angles[k] * 0.5).tan();
        }

        for (i, length) in lengths.iter().enumerate() {
            let needed = tangents[i] + tangents[i + 1];
            if needed > length + VERTEX_MERGE_EPSILON {
                return Err(MeshError::invalid_parameter(format!(
                    "segment {i} of length {length} is too short for its bends (needs {needed})"
                )));
            }
        }

        let mut samples = vec![PathSample {
            position: points[0],
            tangent: directions[0],
        }];
        let mut length = 0.0;
        let mut last = points[0];

        for k in 1..m - 1 {
            let (d_in, d_out) = (directions[k - 1], directions[k]);
            let arc_start = points[k] - d_in * tangents[k];
            length += arc_start.distance(last);

            let axis = d_in.cross(d_out).normalize();
            let center = arc_start + axis.cross(d_in) * radius;
            let subdivisions = self.params.subdivisions(angles[k]);

            for j in 0..=subdivisions {
                let rotation = DQuat::from_axis_angle(axis, angles[k] * j as f64 / subdivisions as f64);
                push_sample(
                    &mut samples,
                    center + rotation * (arc_start - center),
                    (rotation * d_in).normalize(),
                );
            }

            length += radius * angles[k];
            last = points[k] + d_out * tangents[k];
        }

        length += points[m - 1].distance(last);
        push_sample(&mut samples, points[m - 1], directions[m - 2]);

        Ok(Centerline { samples, length })
    }

    /// Sweeps `cross_section` along the path.
    ///
    /// # Errors
    ///
    /// Fails as [`Wire::centerline`] does, when the sweep would exceed the
    /// vertex limit, or when a cap is requested on a collapsed cross section.
    pub fn build(&self, cross_section: &Ring, options: &WireBuildOptions) -> MeshResult<WireSweep> {
        let centerline = self.centerline()?;
        let n = cross_section.len();

        let vertex_count = centerline.samples.len() * n;
        if vertex_count > MAX_VERTICES {
            return Err(MeshError::TooManyVertices {
                count: vertex_count,
                max: MAX_VERTICES,
            });
        }

        let rings = sweep_rings(cross_section, &centerline.samples)?;
        let step_forward = cross_section.winding() == Winding::Ccw;
        let identity = Transform::identity();

        let mut fragments = Vec::new();
        if options.weld_ends {
            let mut fragment = MeshFragment::with_capacity(vertex_count, rings.len() + 1);
            for ring in &rings {
                fragment.add_vertices(ring.vertices());
            }
            for k in 0..rings.len() - 1 {
                add_band(&mut fragment, (k * n) as u32, ((k + 1) * n) as u32, n, step_forward);
            }
            if options.cap_start {
                fragment.append_faces(&paint(&rings[0], false, &identity)?, 0);
            }
            if options.cap_end {
                let base = ((rings.len() - 1) * n) as u32;
                fragment.append_faces(&paint(&rings[rings.len() - 1], true, &identity)?, base);
            }
            fragments.push(fragment);
        } else {
            if options.cap_start {
                fragments.push(paint(&rings[0], false, &identity)?);
            }
            for pair in rings.windows(2) {
                fragments.push(stitch_rings(&pair[0], &pair[1], step_forward, &identity));
            }
            if options.cap_end {
                fragments.push(paint(&rings[rings.len() - 1], true, &identity)?);
            }
        }

        for fragment in &mut fragments {
            fragment.transform(&options.transform)?;
            if options.transform.mirrors() {
                fragment.flip_faces();
            }
        }

        debug!(
            points = self.points.len(),
            rings = rings.len(),
            fragments = fragments.len(),
            length = centerline.length,
            "swept wire"
        );

        Ok(WireSweep {
            fragments,
            length: centerline.length,
        })
    }
}

// =============================================================================
// HELPERS
// =============================================================================

/// Collapses duplicates and drops straight interior points.
fn simplify(points: &[DVec3]) -> MeshResult<Vec<DVec3>> {
    let mut distinct: Vec<DVec3> = Vec::with_capacity(points.len());
    for p in points {
        if distinct.last().map_or(true, |last| last.distance(*p) >= VERTEX_MERGE_EPSILON) {
            distinct.push(*p);
        }
    }
    if distinct.len() < 2 {
        return Err(MeshError::degenerate("wire needs at least two distinct points"));
    }

    let mut kept = vec![distinct[0]];
    for k in 1..distinct.len() - 1 {
        let previous = kept[kept.len() - 1];
        let d_in = (distinct[k] - previous).normalize();
        let d_out = (distinct[k + 1] - distinct[k]).normalize();
        let angle = d_in.angle_between(d_out);
        if angle < STRAIGHT_ANGLE_EPSILON {
            continue;
        }
        if angle > PI - STRAIGHT_ANGLE_EPSILON {
            return Err(MeshError::invalid_parameter(format!(
                "wire doubles back on itself at {}",
                distinct[k]
            )));
        }
        kept.push(distinct[k]);
    }
    kept.push(distinct[distinct.len() - 1]);
    Ok(kept)
}

fn push_sample(samples: &mut Vec<PathSample>, position: DVec3, tangent: DVec3) {
    let duplicate = samples
        .last()
        .is_some_and(|last| last.position.distance(position) < VERTEX_MERGE_EPSILON);
    if !duplicate {
        samples.push(PathSample { position, tangent });
    }
}

/// Places a copy of the cross section at every sample.
fn sweep_rings(cross_section: &Ring, samples: &[PathSample]) -> MeshResult<Vec<Ring>> {
    let mut frame = DQuat::from_rotation_arc(DVec3::Z, samples[0].tangent);
    let mut previous = samples[0].tangent;
    let mut rings = Vec::with_capacity(samples.len());

    for sample in samples {
        frame = (DQuat::from_rotation_arc(previous, sample.tangent) * frame).normalize();
        previous = sample.tangent;
        let vertices = cross_section
            .iter()
            .map(|v| sample.position + frame * *v)
            .collect();
        rings.push(Ring::new(vertices, cross_section.winding())?);
    }
    Ok(rings)
}

#[cfg(test)]
mod tests;
