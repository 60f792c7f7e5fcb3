//! Tests for profile rings.

use super::*;
use approx::assert_relative_eq;
use std::f64::consts::TAU;

// =============================================================================
// RING TESTS
// =============================================================================

#[test]
fn test_ring_rejects_too_few_vertices() {
    let result = Ring::new(vec![DVec3::ZERO, DVec3::X], Winding::Ccw);
    assert!(matches!(result, Err(MeshError::DegenerateGeometry { .. })));
}

#[test]
fn test_ring_rejects_non_finite() {
    let result = Ring::new(
        vec![DVec3::ZERO, DVec3::X, DVec3::new(0.0, f64::INFINITY, 0.0)],
        Winding::Ccw,
    );
    assert!(matches!(result, Err(MeshError::InvalidParameter { .. })));
}

#[test]
fn test_ring_newell_normal_and_area() {
    let ring = RectangleParams::default()
        .calc(2.0, 3.0, &Transform::identity())
        .unwrap();
    let normal = ring.newell_normal();
    assert!(normal.z > 0.0);
    assert_relative_eq!(ring.area(), 6.0, epsilon = 1e-12);
    assert!(ring.is_planar());
}

#[test]
fn test_ring_reversed_flips_winding() {
    let ring = CircleParams::default().calc(1.0, 1.0, &Transform::identity()).unwrap();
    let reversed = ring.reversed();
    assert_eq!(reversed.winding(), Winding::Cw);
    assert!(reversed.newell_normal().z < 0.0);
    assert_eq!(reversed.vertex(0), ring.vertex(ring.len() - 1));
}

#[test]
fn test_ring_transformed_about_pivot() {
    let ring = RectangleParams::default()
        .calc(2.0, 2.0, &Transform::identity())
        .unwrap();
    let pivot = DVec3::new(1.0, -1.0, 0.0);
    let shrunk = ring
        .transformed_about(pivot, &Transform::identity().with_uniform_scale(0.5))
        .unwrap();
    // The corner at the pivot stays in place
    assert!(shrunk.vertex(0).abs_diff_eq(pivot, 1e-12));
    assert_relative_eq!(shrunk.area(), 1.0, epsilon = 1e-12);
}

#[test]
fn test_ring_collapsed() {
    let ring = CircleParams::default().calc(1.0, 1.0, &Transform::identity()).unwrap();
    assert!(!ring.is_collapsed());
    let tip = ring
        .transformed(&Transform::identity().with_uniform_scale(0.0))
        .unwrap();
    assert!(tip.is_collapsed());
    assert_eq!(tip.len(), ring.len());
}

#[test]
fn test_ring_centroid() {
    let ring = RectangleParams::default()
        .calc(2.0, 2.0, &Transform::from_translation(DVec3::new(1.0, 2.0, 3.0)))
        .unwrap();
    assert!(ring.centroid().abs_diff_eq(DVec3::new(1.0, 2.0, 3.0), 1e-12));
}

// =============================================================================
// CIRCLE TESTS
// =============================================================================

#[test]
fn test_circle_spacing_and_radius() {
    for n in [3usize, 4, 7, 16, 360] {
        let ring = CircleParams { vertices: n }
            .calc(2.5, 2.5, &Transform::identity())
            .unwrap();
        assert_eq!(ring.len(), n);
        assert!(ring.vertex(0).abs_diff_eq(DVec3::new(2.5, 0.0, 0.0), 1e-12));
        for i in 0..n {
            let v = ring.vertex(i);
            assert_relative_eq!(v.length(), 2.5, epsilon = 1e-12);
            let next = ring.vertex((i + 1) % n);
            let angle = v.angle_between(next);
            assert_relative_eq!(angle, TAU / n as f64, epsilon = 1e-9);
        }
        assert_eq!(ring.winding(), Winding::Ccw);
        assert!(ring.newell_normal().z > 0.0);
    }
}

#[test]
fn test_circle_elliptic_radii() {
    let ring = CircleParams { vertices: 4 }
        .calc(2.0, 1.0, &Transform::identity())
        .unwrap();
    assert!(ring.vertex(0).abs_diff_eq(DVec3::new(2.0, 0.0, 0.0), 1e-12));
    assert!(ring.vertex(1).abs_diff_eq(DVec3::new(0.0, 1.0, 0.0), 1e-12));
}

#[test]
fn test_circle_rejects_bad_parameters() {
    let identity = Transform::identity();
    assert!(CircleParams { vertices: 2 }.calc(1.0, 1.0, &identity).is_err());
    assert!(CircleParams { vertices: 361 }.calc(1.0, 1.0, &identity).is_err());
    assert!(CircleParams::default().calc(0.0, 1.0, &identity).is_err());
    assert!(CircleParams::default().calc(1.0, 1000.0, &identity).is_err());
}

#[test]
fn test_circle_applies_transform() {
    let t = Transform::from_translation(DVec3::new(0.0, 0.0, 4.0));
    let ring = CircleParams::default().calc(1.0, 1.0, &t).unwrap();
    assert!(ring.iter().all(|v| (v.z - 4.0).abs() < 1e-12));
}

// =============================================================================
// RECTANGLE TESTS
// =============================================================================

#[test]
fn test_rectangle_sharp_corners() {
    let ring = RectangleParams::default()
        .calc(4.0, 2.0, &Transform::identity())
        .unwrap();
    assert_eq!(ring.len(), 4);
    assert_eq!(ring.vertex(0), DVec3::new(2.0, -1.0, 0.0));
    assert_eq!(ring.vertex(1), DVec3::new(2.0, 1.0, 0.0));
    assert_eq!(ring.vertex(2), DVec3::new(-2.0, 1.0, 0.0));
    assert_eq!(ring.vertex(3), DVec3::new(-2.0, -1.0, 0.0));
}

#[test]
fn test_rectangle_zero_bevel_ignores_segments() {
    let plain = RectangleParams::default()
        .calc(3.0, 3.0, &Transform::identity())
        .unwrap();
    let zero_bevel = RectangleParams {
        bevel_radius: 0.0,
        bevel_segments: 12,
    }
    .calc(3.0, 3.0, &Transform::identity())
    .unwrap();
    assert_eq!(plain, zero_bevel);
}

#[test]
fn test_rectangle_chamfer() {
    let ring = RectangleParams::chamfer(0.5)
        .calc(4.0, 2.0, &Transform::identity())
        .unwrap();
    assert_eq!(ring.len(), 8);
    assert!(ring.vertex(0).abs_diff_eq(DVec3::new(1.5, -1.0, 0.0), 1e-12));
    assert!(ring.vertex(1).abs_diff_eq(DVec3::new(2.0, -0.5, 0.0), 1e-12));
    // Full area minus four corner triangles
    assert_relative_eq!(ring.area(), 8.0 - 4.0 * 0.125, epsilon = 1e-12);
}

#[test]
fn test_rectangle_rounded() {
    let params = RectangleParams {
        bevel_radius: 0.25,
        bevel_segments: 5,
    };
    let ring = params.calc(2.0, 2.0, &Transform::identity()).unwrap();
    assert_eq!(ring.len(), params.vertex_count());
    assert_eq!(ring.len(), 20);
    assert!(ring.newell_normal().z > 0.0);
    // Every vertex lies within the sharp rectangle
    assert!(ring.iter().all(|v| v.x.abs() <= 1.0 + 1e-12 && v.y.abs() <= 1.0 + 1e-12));
}

#[test]
fn test_rectangle_rejects_bad_bevel() {
    let identity = Transform::identity();
    assert!(RectangleParams::chamfer(1.0).calc(2.0, 4.0, &identity).is_err());
    assert!(RectangleParams::chamfer(-0.1).calc(2.0, 4.0, &identity).is_err());
    let one_segment = RectangleParams {
        bevel_radius: 0.2,
        bevel_segments: 1,
    };
    assert!(one_segment.calc(2.0, 4.0, &identity).is_err());
    assert!(RectangleParams::default().calc(0.0, 4.0, &identity).is_err());
}

// =============================================================================
// SIMPLE POLY TESTS
// =============================================================================

#[test]
fn test_simple_poly_skips_duplicates() {
    let ring = SimplePoly::new()
        .add_vertex(0.0, 0.0, 0.0)
        .add_vertex(0.0, 0.0, 0.0)
        .add_vertex(1.0, 0.0, 0.0)
        .add_vertex(1.0, 1.0, 0.0)
        .add_vertex(0.0, 0.0, 1e-12)
        .build()
        .unwrap();
    assert_eq!(ring.len(), 3);
}

#[test]
fn test_simple_poly_too_few_after_dedup() {
    let result = SimplePoly::new()
        .add_vertex(0.0, 0.0, 0.0)
        .add_vertex(1.0, 0.0, 0.0)
        .add_vertex(1.0, 0.0, 0.0)
        .build();
    assert!(result.is_err());
}

#[test]
fn test_simple_poly_winding_and_append() {
    let square = RectangleParams::default()
        .calc(1.0, 1.0, &Transform::identity())
        .unwrap();
    let poly = SimplePoly::from_ring(&square);
    assert_eq!(poly.len(), 4);
    let ring = poly.with_winding(Winding::Cw).build().unwrap();
    assert_eq!(ring.winding(), Winding::Cw);

    let shifted = square
        .transformed(&Transform::from_translation(DVec3::X * 5.0))
        .unwrap();
    let joined = SimplePoly::new().append_ring(&square).append_ring(&shifted).build().unwrap();
    assert_eq!(joined.len(), 8);
}
