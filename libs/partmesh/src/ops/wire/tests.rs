//! Tests for wire sweeps.

use super::*;
use crate::ring::{CircleParams, RectangleParams};
use approx::assert_relative_eq;

fn section() -> Ring {
    CircleParams { vertices: 8 }
        .calc(0.25, 0.25, &Transform::identity())
        .unwrap()
}

fn wire(points: &[[f64; 3]]) -> Wire {
    let mut wire = Wire::new(WireParams {
        segments_per_bend: 5,
        bend_radius: 1.0,
    })
    .unwrap();
    for p in points {
        wire.add_point(p[0], p[1], p[2]).unwrap();
    }
    wire
}

// =============================================================================
// PARAMETER TESTS
// =============================================================================

#[test]
fn test_params_validation() {
    assert!(WireParams::default().validate().is_ok());
    let too_few = WireParams {
        segments_per_bend: 1,
        ..Default::default()
    };
    assert!(Wire::new(too_few).is_err());
    let too_many = WireParams {
        segments_per_bend: 91,
        ..Default::default()
    };
    assert!(too_many.validate().is_err());
    let flat = WireParams {
        bend_radius: 0.0,
        ..Default::default()
    };
    assert!(flat.validate().is_err());
}

#[test]
fn test_subdivisions_proportional_to_angle() {
    let params = WireParams {
        segments_per_bend: 6,
        bend_radius: 1.0,
    };
    assert_eq!(params.subdivisions(FRAC_PI_2), 6);
    assert_eq!(params.subdivisions(FRAC_PI_2 / 2.0), 3);
    assert_eq!(params.subdivisions(PI), 12);
    assert_eq!(params.subdivisions(1e-3), 1);
}

#[test]
fn test_point_bookkeeping() {
    let mut w = wire(&[[0.0, 0.0, 0.0], [0.0, 0.0, 1.0]]);
    assert_eq!(w.len(), 2);
    assert!(w.add_point(f64::NAN, 0.0, 0.0).is_err());
    w.clear();
    assert!(w.is_empty());
    assert_eq!(w.params().segments_per_bend, 5);
}

// =============================================================================
// CENTERLINE TESTS
// =============================================================================

#[test]
fn test_straight_centerline() {
    let centerline = wire(&[[0.0, 0.0, 0.0], [0.0, 0.0, 4.0]]).centerline().unwrap();
    assert_eq!(centerline.samples.len(), 2);
    assert_relative_eq!(centerline.length, 4.0, epsilon = 1e-12);
    assert!(centerline.samples[0].tangent.abs_diff_eq(DVec3::Z, 1e-12));
}

#[test]
fn test_right_angle_bend() {
    let centerline = wire(&[[0.0, 0.0, 0.0], [0.0, 0.0, 10.0], [10.0, 0.0, 10.0]])
        .centerline()
        .unwrap();
    // start + 6 arc samples + end
    assert_eq!(centerline.samples.len(), 8);
    assert_relative_eq!(centerline.length, 9.0 + 9.0 + FRAC_PI_2, epsilon = 1e-9);

    let arc_start = centerline.samples[1];
    let arc_end = centerline.samples[6];
    assert!(arc_start.position.abs_diff_eq(DVec3::new(0.0, 0.0, 9.0), 1e-9));
    assert!(arc_end.position.abs_diff_eq(DVec3::new(1.0, 0.0, 10.0), 1e-9));
    assert!(arc_end.tangent.abs_diff_eq(DVec3::X, 1e-9));

    // Arc samples lie on the bend radius
    let center = DVec3::new(1.0, 0.0, 9.0);
    for sample in &centerline.samples[1..7] {
        assert_relative_eq!(sample.position.distance(center), 1.0, epsilon = 1e-9);
    }
}

#[test]
fn test_duplicate_points_collapse() {
    let clean = wire(&[[0.0, 0.0, 0.0], [0.0, 0.0, 5.0], [5.0, 0.0, 5.0], [5.0, 5.0, 5.0]]);
    let noisy = wire(&[
        [0.0, 0.0, 0.0],
        [0.0, 0.0, 0.0],
        [0.0, 0.0, 5.0],
        [0.0, 0.0, 5.0],
        [0.0, 0.0, 5.0],
        [5.0, 0.0, 5.0],
        [5.0, 5.0, 5.0],
        [5.0, 5.0, 5.0],
    ]);
    assert_eq!(clean.centerline().unwrap(), noisy.centerline().unwrap());

    let options = WireBuildOptions::default();
    let a = clean.build(&section(), &options).unwrap();
    let b = noisy.build(&section(), &options).unwrap();
    assert_eq!(a, b);
    assert!(b.fragments.iter().all(MeshFragment::validate));
}

#[test]
fn test_collinear_points_dropped() {
    let direct = wire(&[[0.0, 0.0, 0.0], [0.0, 0.0, 10.0]]);
    let split = wire(&[[0.0, 0.0, 0.0], [0.0, 0.0, 2.5], [0.0, 0.0, 7.0], [0.0, 0.0, 10.0]]);
    assert_eq!(direct.centerline().unwrap(), split.centerline().unwrap());
}

#[test]
fn test_zero_length_wire() {
    let w = wire(&[[1.0, 1.0, 1.0], [1.0, 1.0, 1.0]]);
    assert!(matches!(w.centerline(), Err(MeshError::DegenerateGeometry { .. })));
    let empty = wire(&[]);
    assert!(empty.build(&section(), &WireBuildOptions::default()).is_err());
}

#[test]
fn test_segment_too_short() {
    let w = wire(&[[0.0, 0.0, 0.0], [0.0, 0.0, 0.5], [10.0, 0.0, 0.5]]);
    assert!(matches!(w.centerline(), Err(MeshError::InvalidParameter { .. })));
}

#[test]
fn test_segment_exactly_consumed() {
    // Both 90 degree bends need 1.0 each on the middle segment of length 2.0
    let w = wire(&[[0.0, 0.0, 0.0], [0.0, 0.0, 5.0], [2.0, 0.0, 5.0], [2.0, 0.0, 0.0]]);
    let centerline = w.centerline().unwrap();
    // start + 6 + 5 (shared joint) + end
    assert_eq!(centerline.samples.len(), 13);
    assert_relative_eq!(centerline.length, 4.0 + 4.0 + PI, epsilon = 1e-9);
}

#[test]
fn test_reversal_rejected() {
    let w = wire(&[[0.0, 0.0, 0.0], [0.0, 0.0, 5.0], [0.0, 0.0, 1.0]]);
    assert!(matches!(w.centerline(), Err(MeshError::InvalidParameter { .. })));
}

// =============================================================================
// SWEEP TESTS
// =============================================================================

#[test]
fn test_straight_sweep_faces_outward() {
    let sweep = wire(&[[0.0, 0.0, 0.0], [0.0, 0.0, 3.0]])
        .build(&section(), &WireBuildOptions::default())
        .unwrap();
    assert_eq!(sweep.fragments.len(), 1);
    let fragment = &sweep.fragments[0];
    // 8 sides plus two caps
    assert_eq!(fragment.face_count(), 10);
    assert_eq!(fragment.vertex_count(), 16);

    for i in 0..8 {
        let face = fragment.face(i);
        let center = face.iter().map(|&v| fragment.vertex(v)).sum::<DVec3>() / 4.0;
        let radial = DVec3::new(center.x, center.y, 0.0);
        assert!(fragment.face_normal(i).dot(radial) > 0.0);
    }
    assert!(fragment.face_normal(8).z < 0.0);
    assert!(fragment.face_normal(9).z > 0.0);
}

#[test]
fn test_rings_stay_perpendicular() {
    let w = wire(&[[0.0, 0.0, 0.0], [0.0, 0.0, 4.0], [4.0, 0.0, 4.0], [4.0, 4.0, 4.0]]);
    let centerline = w.centerline().unwrap();
    let rings = sweep_rings(&section(), &centerline.samples).unwrap();
    for (ring, sample) in rings.iter().zip(&centerline.samples) {
        assert!(ring.centroid().abs_diff_eq(sample.position, 1e-9));
        for v in ring.iter() {
            assert!((*v - sample.position).dot(sample.tangent).abs() < 1e-9);
            assert_relative_eq!(v.distance(sample.position), 0.25, epsilon = 1e-9);
        }
    }
}

#[test]
fn test_unwelded_segments() {
    let w = wire(&[[0.0, 0.0, 0.0], [0.0, 0.0, 10.0], [10.0, 0.0, 10.0]]);
    let options = WireBuildOptions {
        weld_ends: false,
        ..Default::default()
    };
    let sweep = w.build(&section(), &options).unwrap();
    // start cap + 7 segments + end cap
    assert_eq!(sweep.fragments.len(), 9);
    assert_eq!(sweep.fragments[1].face_count(), 8);
    assert_eq!(sweep.fragments[1].vertex_count(), 16);

    let welded = w.build(&section(), &WireBuildOptions::default()).unwrap();
    assert_eq!(welded.fragments[0].vertex_count(), 8 * 8);
    let total_faces: usize = sweep.fragments.iter().map(MeshFragment::face_count).sum();
    assert_eq!(total_faces, welded.fragments[0].face_count());
    assert_relative_eq!(sweep.length, welded.length, epsilon = 1e-12);
}

#[test]
fn test_sweep_without_caps() {
    let options = WireBuildOptions {
        cap_start: false,
        cap_end: false,
        ..Default::default()
    };
    let sweep = wire(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]])
        .build(&section(), &options)
        .unwrap();
    assert_eq!(sweep.fragments[0].face_count(), 8);
}

#[test]
fn test_sweep_applies_transform() {
    let options = WireBuildOptions {
        transform: Transform::from_translation(DVec3::new(0.0, 0.0, 100.0)),
        ..Default::default()
    };
    let sweep = wire(&[[0.0, 0.0, 0.0], [0.0, 0.0, 1.0]])
        .build(&section(), &options)
        .unwrap();
    let (min, max) = sweep.fragments[0].bounding_box();
    assert_relative_eq!(min.z, 100.0, epsilon = 1e-9);
    assert_relative_eq!(max.z, 101.0, epsilon = 1e-9);
}

#[test]
fn test_sweep_rejects_non_finite_transform() {
    let options = WireBuildOptions {
        transform: Transform::identity().with_uniform_scale(f64::NAN),
        ..Default::default()
    };
    let result = wire(&[[0.0, 0.0, 0.0], [0.0, 0.0, 1.0]]).build(&section(), &options);
    assert!(matches!(result, Err(MeshError::InvalidParameter { .. })));
}

#[test]
fn test_square_section_along_negative_z() {
    let square = RectangleParams::default()
        .calc(0.5, 0.5, &Transform::identity())
        .unwrap();
    let sweep = wire(&[[0.0, 0.0, 3.0], [0.0, 0.0, 0.0]])
        .build(&square, &WireBuildOptions::default())
        .unwrap();
    let fragment = &sweep.fragments[0];
    assert!(fragment.validate());
    // Start cap faces back along +Z, end cap faces down
    assert!(fragment.face_normal(4).z > 0.0);
    assert!(fragment.face_normal(5).z < 0.0);
}

#[test]
fn test_collapsed_section_rejects_caps() {
    let tip = section()
        .transformed(&Transform::identity().with_uniform_scale(0.0))
        .unwrap();
    let w = wire(&[[0.0, 0.0, 0.0], [0.0, 0.0, 1.0]]);
    assert!(w.build(&tip, &WireBuildOptions::default()).is_err());
    let open = WireBuildOptions {
        cap_start: false,
        cap_end: false,
        ..Default::default()
    };
    assert!(w.build(&tip, &open).is_ok());
}
