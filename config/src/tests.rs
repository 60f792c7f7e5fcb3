//! # Tests for Config Constants
//!
//! Unit tests verifying the correctness of configuration constants
//! and helper functions.

use crate::constants::*;

// =============================================================================
// PRECISION TESTS
// =============================================================================

#[test]
fn test_epsilon_is_positive() {
    assert!(EPSILON > 0.0, "EPSILON must be positive");
}

#[test]
fn test_vertex_merge_epsilon_larger_than_epsilon() {
    assert!(
        VERTEX_MERGE_EPSILON >= EPSILON,
        "VERTEX_MERGE_EPSILON should be >= EPSILON"
    );
}

#[test]
fn test_merge_epsilon_below_written_resolution() {
    // Merged vertices must be indistinguishable in the output file
    let resolution = 10f64.powi(-(COORDINATE_PRECISION as i32));
    assert!(VERTEX_MERGE_EPSILON < resolution);
}

// =============================================================================
// PROFILE TESTS
// =============================================================================

#[test]
fn test_ring_needs_three_vertices() {
    assert_eq!(MIN_RING_VERTICES, 3);
}

#[test]
fn test_default_circle_within_limits() {
    assert!((MIN_RING_VERTICES..=MAX_CIRCLE_VERTICES).contains(&DEFAULT_CIRCLE_VERTICES));
}

#[test]
fn test_radius_limits_ordered() {
    assert!(MIN_RADIUS > 0.0);
    assert!(MIN_RADIUS < MAX_RADIUS);
}

#[test]
fn test_bevel_segments_allow_chamfer() {
    // Two vertices per corner is a straight chamfer
    assert_eq!(MIN_BEVEL_SEGMENTS, 2);
    assert!(MAX_BEVEL_SEGMENTS > MIN_BEVEL_SEGMENTS);
}

#[test]
fn test_dimple_defaults_valid() {
    assert!(DEFAULT_DIMPLE_SECTIONS >= MIN_DIMPLE_SECTIONS);
    assert!(MAX_DIMPLE_DEPTH_RATIO > 1.0);
}

// =============================================================================
// WIRE TESTS
// =============================================================================

#[test]
fn test_bend_segments_range() {
    assert!(MIN_BEND_SEGMENTS >= 2);
    assert!((MIN_BEND_SEGMENTS..=MAX_BEND_SEGMENTS).contains(&DEFAULT_BEND_SEGMENTS));
}

#[test]
fn test_default_bend_radius_valid() {
    assert!(DEFAULT_BEND_RADIUS > MIN_BEND_RADIUS);
}

// =============================================================================
// SETTINGS TESTS
// =============================================================================

#[test]
fn test_settings_default_uses_constants() {
    let settings = MeshSettings::default();
    assert_eq!(settings.merge_tolerance, VERTEX_MERGE_EPSILON);
    assert_eq!(settings.coordinate_precision, COORDINATE_PRECISION);
}

#[test]
fn test_settings_rejects_bad_tolerance() {
    assert_eq!(
        MeshSettings::new(-1.0, 5),
        Err(ConfigError::InvalidTolerance(-1.0))
    );
    assert!(MeshSettings::new(f64::NAN, 5).is_err());
}

#[test]
fn test_settings_rejects_bad_precision() {
    assert_eq!(
        MeshSettings::new(1e-6, 0),
        Err(ConfigError::InvalidPrecision(0))
    );
    assert!(MeshSettings::new(1e-6, 13).is_err());
}

#[test]
fn test_config_error_display() {
    let message = ConfigError::InvalidPrecision(20).to_string();
    assert!(message.contains("20"));
}

// =============================================================================
// APPROX TESTS
// =============================================================================

#[test]
fn test_approx_equal_within_epsilon() {
    let small_diff = EPSILON / 2.0;
    assert!(approx_equal(1.0, 1.0 + small_diff));
    assert!(approx_equal(1.0, 1.0 - small_diff));
}

#[test]
fn test_approx_equal_outside_epsilon() {
    let large_diff = EPSILON * 2.0;
    assert!(!approx_equal(1.0, 1.0 + large_diff));
    assert!(!approx_equal(1.0, 1.0 - large_diff));
}

#[test]
fn test_approx_zero() {
    assert!(approx_zero(0.0));
    assert!(approx_zero(-EPSILON / 2.0));
    assert!(!approx_zero(0.1));
}

// =============================================================================
// OUTPUT TESTS
// =============================================================================

#[test]
fn test_output_layout_positive() {
    assert!(INDENT_WIDTH > 0);
    assert!(POINTS_PER_LINE > 0);
    assert!(FACES_PER_LINE > 0);
    assert!(MAX_INDENT >= 4);
}
