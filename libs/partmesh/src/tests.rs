//! # Extrusion Tests
//!
//! Exercises rings, extrusion steps and draft stacks together.

use super::*;
use approx::assert_relative_eq;
use glam::DVec3;

/// Signed volume by the divergence theorem; positive when every face of a
/// closed fragment points outward.
fn signed_volume(fragments: &[MeshFragment]) -> f64 {
    let mut volume = 0.0;
    for fragment in fragments {
        for face in fragment.faces() {
            let v0 = fragment.vertex(face[0]);
            for k in 1..face.len() - 1 {
                let v1 = fragment.vertex(face[k]);
                let v2 = fragment.vertex(face[k + 1]);
                volume += v0.dot(v1.cross(v2)) / 6.0;
            }
        }
    }
    volume
}

fn circle(n: usize) -> Ring {
    CircleParams { vertices: n }
        .calc(1.0, 1.0, &Transform::identity())
        .unwrap()
}

fn polygon_area(n: usize) -> f64 {
    0.5 * n as f64 * (std::f64::consts::TAU / n as f64).sin()
}

// =============================================================================
// EXTRUDE TESTS
// =============================================================================

#[test]
fn test_extrude_rejects_non_finite_step() {
    let mut step = Transform::identity();
    assert!(step.set_scale(1.0, f64::NAN, 1.0).is_err());

    // Builders do not check; the extrusion does
    let step = Transform::identity()
        .with_scale(DVec3::new(1.0, f64::NAN, 1.0))
        .with_translation(DVec3::Z);
    let params = ExtrudeParams {
        step,
        ..Default::default()
    };
    assert!(matches!(
        extrude(&circle(8), &params),
        Err(MeshError::InvalidParameter { .. })
    ));

    let params = ExtrudeParams {
        output: Transform::from_translation(DVec3::new(f64::INFINITY, 0.0, 0.0)),
        ..ExtrudeParams::solid(DVec3::Z)
    };
    assert!(extrude(&circle(8), &params).is_err());

    let moved = circle(8).transformed(&Transform::from_translation(DVec3::new(f64::INFINITY, 0.0, 0.0)));
    assert!(moved.is_err());
}

#[test]
fn test_extrude_solid_cylinder() {
    let result = extrude(&circle(16), &ExtrudeParams::solid(DVec3::Z)).unwrap();
    let fragment = &result.fragment;
    assert_eq!(fragment.vertex_count(), 32);
    assert_eq!(fragment.face_count(), 18);
    assert!(fragment.validate());
    assert_relative_eq!(signed_volume(&[fragment.clone()]), polygon_area(16), epsilon = 1e-9);
    // Bottom cap then top cap follow the sides
    assert!(fragment.face_normal(16).z < 0.0);
    assert!(fragment.face_normal(17).z > 0.0);
}

#[test]
fn test_extrude_next_ring() {
    let ring = circle(8);
    let result = extrude(&ring, &ExtrudeParams::solid(DVec3::new(0.0, 0.0, 3.0))).unwrap();
    assert_eq!(result.next.len(), 8);
    assert!(result.next.vertex(0).abs_diff_eq(DVec3::new(1.0, 0.0, 3.0), 1e-12));
    assert_eq!(result.next.winding(), ring.winding());
}

#[test]
fn test_extrude_facing_is_geometric() {
    let params = ExtrudeParams::solid(DVec3::Z);
    let ccw = extrude(&circle(12), &params).unwrap();
    let cw = extrude(&circle(12).reversed(), &params).unwrap();
    let down = extrude(&circle(12), &ExtrudeParams::solid(DVec3::NEG_Z)).unwrap();

    let expected = polygon_area(12);
    assert_relative_eq!(signed_volume(&[ccw.fragment]), expected, epsilon = 1e-9);
    assert_relative_eq!(signed_volume(&[cw.fragment]), expected, epsilon = 1e-9);
    assert_relative_eq!(signed_volume(&[down.fragment]), expected, epsilon = 1e-9);
}

#[test]
fn test_extrude_inside_facing() {
    let params = ExtrudeParams {
        facing: Facing::Inside,
        ..ExtrudeParams::solid(DVec3::Z)
    };
    let result = extrude(&circle(12), &params).unwrap();
    assert_relative_eq!(signed_volume(&[result.fragment]), -polygon_area(12), epsilon = 1e-9);

    let walls = extrude(&circle(12), &ExtrudeParams::hole(DVec3::Z)).unwrap();
    assert_eq!(walls.fragment.face_count(), 12);
    let face = walls.fragment.face(0);
    let center = face.iter().map(|&i| walls.fragment.vertex(i)).sum::<DVec3>() / 4.0;
    let radial = DVec3::new(center.x, center.y, 0.0);
    assert!(walls.fragment.face_normal(0).dot(radial) < 0.0);
}

#[test]
fn test_extrude_cone_to_collapsed_tip() {
    let apex = DVec3::new(0.0, 0.0, 2.0);
    let params = ExtrudeParams {
        cap_bottom: true,
        pivot: apex,
        step: Transform::identity().with_uniform_scale(0.0),
        ..Default::default()
    };
    let result = extrude(&circle(16), &params).unwrap();
    assert!(result.next.is_collapsed());
    assert!(result.next.vertex(0).abs_diff_eq(apex, 1e-12));
    assert_relative_eq!(
        signed_volume(&[result.fragment]),
        polygon_area(16) * 2.0 / 3.0,
        epsilon = 1e-9
    );

    let capped = ExtrudeParams {
        cap_top: true,
        ..params
    };
    assert!(matches!(
        extrude(&circle(16), &capped),
        Err(MeshError::DegenerateGeometry { .. })
    ));
}

#[test]
fn test_extrude_from_collapsed_tip() {
    let tip = circle(8)
        .transformed(&Transform::identity().with_uniform_scale(0.0))
        .unwrap();
    let params = ExtrudeParams {
        cap_top: true,
        step: Transform::from_translation(DVec3::Z),
        ..Default::default()
    };
    // Both rings are points: there is no surface to orient
    assert!(extrude(&tip, &params).is_err());
}

#[test]
fn test_extrude_output_transform_only_moves_fragment() {
    let params = ExtrudeParams {
        output: Transform::from_translation(DVec3::new(5.0, 0.0, 0.0)),
        ..ExtrudeParams::solid(DVec3::Z)
    };
    let result = extrude(&circle(8), &params).unwrap();
    let (min, max) = result.fragment.bounding_box();
    assert_relative_eq!(min.x, 4.0, epsilon = 1e-12);
    assert_relative_eq!(max.x, 6.0, epsilon = 1e-12);
    // The successor ring is not placed
    assert!(result.next.vertex(0).abs_diff_eq(DVec3::new(1.0, 0.0, 1.0), 1e-12));
}

#[test]
fn test_extrude_mirrored_output_keeps_outward() {
    let params = ExtrudeParams {
        output: Transform::identity().with_scale(DVec3::new(-1.0, 1.0, 1.0)),
        ..ExtrudeParams::solid(DVec3::Z)
    };
    let result = extrude(&circle(10), &params).unwrap();
    assert!(signed_volume(&[result.fragment]) > 0.0);
}

#[test]
fn test_extrude_without_sides() {
    let params = ExtrudeParams {
        make_sides: false,
        ..ExtrudeParams::solid(DVec3::Z)
    };
    let result = extrude(&circle(6), &params).unwrap();
    assert_eq!(result.fragment.face_count(), 2);
}

// =============================================================================
// DRAFT STACK TESTS
// =============================================================================

#[test]
fn test_draft_round_trip() {
    let (width, length, height) = (10.0, 8.0, 1.2);
    let angle = std::f64::consts::PI / 30.0;
    let fx = DraftFactors::from_angle(width, height, angle).unwrap();
    let fy = DraftFactors::from_angle(length, height, angle).unwrap();

    let ring = RectangleParams::chamfer(0.5)
        .calc(width, length, &Transform::identity())
        .unwrap();
    let narrowed = ring.transformed(&draft_step(fx.shrink, fy.shrink, height)).unwrap();
    let restored = narrowed.transformed(&draft_step(fx.grow, fy.grow, height)).unwrap();

    for (a, b) in ring.iter().zip(restored.iter()) {
        assert_relative_eq!(a.x, b.x, epsilon = 1e-12);
        assert_relative_eq!(a.y, b.y, epsilon = 1e-12);
        assert_relative_eq!(b.z, 2.0 * height, epsilon = 1e-12);
    }
}

#[test]
fn test_package_stack_is_closed_solid() {
    // chamfer, draft, middle, draft, chamfer
    let (width, length) = (7.0, 7.0);
    let chamfer = DraftFactors::from_chamfer(width, 0.1).unwrap();
    let draft = DraftFactors::from_angle(width, 0.5, 0.1).unwrap();

    let ring = RectangleParams::default()
        .calc(width * chamfer.shrink, length * chamfer.shrink, &Transform::identity())
        .unwrap();
    let steps = [
        ExtrudeParams {
            cap_bottom: true,
            step: draft_step(chamfer.grow, chamfer.grow, 0.05),
            ..Default::default()
        },
        ExtrudeParams {
            step: draft_step(draft.shrink, draft.shrink, 0.5),
            ..Default::default()
        },
        ExtrudeParams {
            step: draft_step(1.0, 1.0, 0.2),
            ..Default::default()
        },
        ExtrudeParams {
            step: draft_step(draft.grow, draft.grow, 0.5),
            ..Default::default()
        },
        ExtrudeParams {
            cap_top: true,
            step: draft_step(chamfer.shrink, chamfer.shrink, 0.05),
            ..Default::default()
        },
    ];

    let (fragments, last) = extrude_chain(&ring, &steps).unwrap();
    assert_eq!(fragments.len(), 5);
    assert!(fragments.iter().all(MeshFragment::validate));
    assert!(signed_volume(&fragments) > 0.0);
    // The stack returns to its starting footprint
    for (a, b) in ring.iter().zip(last.iter()) {
        assert_relative_eq!(a.x, b.x, epsilon = 1e-12);
        assert_relative_eq!(a.y, b.y, epsilon = 1e-12);
    }
    assert_relative_eq!(last.vertex(0).z, 1.3, epsilon = 1e-12);
}

#[test]
fn test_stitch_matches_extrude_sides() {
    let ring = circle(9);
    let params = ExtrudeParams {
        step: Transform::from_translation(DVec3::Z),
        ..Default::default()
    };
    let result = extrude(&ring, &params).unwrap();
    let band = stitch(&ring, &result.next, true, &Transform::identity()).unwrap();
    assert_eq!(band, result.fragment);
}
