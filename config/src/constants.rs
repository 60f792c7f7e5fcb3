//! # Configuration Constants
//!
//! Centralized constants for the component mesh pipeline. All geometry
//! tolerances, profile limits and output formatting values are defined here.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison tolerances
//! - **Profiles**: Ring vertex counts and radius limits
//! - **Wire**: Bend subdivision limits and defaults
//! - **Output**: Scene file formatting parameters
//! - **Limits**: Maximum values for safety bounds

use std::fmt;

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Epsilon for floating-point comparisons.
///
/// Used for determining if two floating-point values are "equal" within
/// numerical tolerance.
///
/// # Example
///
/// ```rust
/// use config::constants::EPSILON;
///
/// fn approximately_equal(a: f64, b: f64) -> bool {
///     (a - b).abs() < EPSILON
/// }
///
/// assert!(approximately_equal(1.0, 1.0 + 1e-11));
/// ```
pub const EPSILON: f64 = 1e-10;

/// Epsilon for vertex deduplication.
///
/// Two consecutive profile or path vertices closer than this distance are
/// treated as one vertex. Chosen well below the resolution written to the
/// scene file (see [`COORDINATE_PRECISION`]).
///
/// # Example
///
/// ```rust
/// use config::constants::VERTEX_MERGE_EPSILON;
///
/// fn vertices_should_merge(v1: [f64; 3], v2: [f64; 3]) -> bool {
///     let dx = v1[0] - v2[0];
///     let dy = v1[1] - v2[1];
///     let dz = v1[2] - v2[2];
///     (dx * dx + dy * dy + dz * dz).sqrt() < VERTEX_MERGE_EPSILON
/// }
///
/// assert!(vertices_should_merge([0.0; 3], [1e-10, 0.0, 0.0]));
/// ```
pub const VERTEX_MERGE_EPSILON: f64 = 1e-8;

/// Minimum doubled triangle area kept by the tessellator.
///
/// Cap triangles below this are slivers produced by collinear boundary
/// vertices and are dropped instead of written.
pub const MIN_TRIANGLE_AREA: f64 = 1e-12;

/// Angle (radians) below which a wire path vertex is considered straight.
pub const STRAIGHT_ANGLE_EPSILON: f64 = 1e-9;

// =============================================================================
// PROFILE CONSTANTS
// =============================================================================

/// Minimum number of vertices in any ring.
pub const MIN_RING_VERTICES: usize = 3;

/// Maximum number of vertices for a generated circle.
///
/// # Example
///
/// ```rust
/// use config::constants::{MAX_CIRCLE_VERTICES, MIN_RING_VERTICES};
///
/// let requested = 1000;
/// let accepted = (MIN_RING_VERTICES..=MAX_CIRCLE_VERTICES).contains(&requested);
/// assert!(!accepted);
/// ```
pub const MAX_CIRCLE_VERTICES: usize = 360;

/// Default number of vertices for a circle profile.
pub const DEFAULT_CIRCLE_VERTICES: usize = 16;

/// Smallest radius accepted by circle profiles (mm).
pub const MIN_RADIUS: f64 = 1e-6;

/// Largest radius accepted by circle profiles (mm).
pub const MAX_RADIUS: f64 = 100.0;

/// Smallest side length accepted by rectangle profiles (mm).
pub const MIN_LENGTH: f64 = 1e-6;

/// Minimum arc vertices per beveled rectangle corner.
///
/// Two vertices produce a straight chamfer; more produce a rounded corner.
pub const MIN_BEVEL_SEGMENTS: usize = 2;

/// Maximum arc vertices per beveled rectangle corner.
pub const MAX_BEVEL_SEGMENTS: usize = 90;

/// Minimum rings between a dimple's rim and its pole.
pub const MIN_DIMPLE_SECTIONS: usize = 2;

/// Default rings between a dimple's rim and its pole.
pub const DEFAULT_DIMPLE_SECTIONS: usize = 5;

/// Largest dimple depth as a multiple of its rim radius.
///
/// Deeper caps approach a full sphere pinched through a tiny opening.
pub const MAX_DIMPLE_DEPTH_RATIO: f64 = 50.0;

// =============================================================================
// WIRE CONSTANTS
// =============================================================================

/// Minimum sub-segments for a 90 degree wire bend.
pub const MIN_BEND_SEGMENTS: u32 = 2;

/// Maximum sub-segments for a 90 degree wire bend.
pub const MAX_BEND_SEGMENTS: u32 = 90;

/// Default sub-segments for a 90 degree wire bend.
///
/// # Example
///
/// ```rust
/// use config::constants::{DEFAULT_BEND_SEGMENTS, MIN_BEND_SEGMENTS, MAX_BEND_SEGMENTS};
///
/// assert!((MIN_BEND_SEGMENTS..=MAX_BEND_SEGMENTS).contains(&DEFAULT_BEND_SEGMENTS));
/// ```
pub const DEFAULT_BEND_SEGMENTS: u32 = 5;

/// Default wire bend radius (mm).
pub const DEFAULT_BEND_RADIUS: f64 = 1.0;

/// Smallest bend radius accepted by the wire builder (mm).
pub const MIN_BEND_RADIUS: f64 = 1e-9;

// =============================================================================
// OUTPUT CONSTANTS
// =============================================================================

/// Decimal places written for vertex coordinates.
///
/// Trailing zeros are trimmed, so `1.5` is written as `1.5`, not `1.50000`.
pub const COORDINATE_PRECISION: usize = 5;

/// Decimal places written for material coefficients.
pub const MATERIAL_PRECISION: usize = 5;

/// Spaces per indent level in the scene file.
pub const INDENT_WIDTH: usize = 4;

/// Deepest indent level honored by the scene writer.
///
/// Deeper requests are clamped so that heavily nested scopes remain readable.
pub const MAX_INDENT: usize = 16;

/// Vertices written per line in a `point [ ... ]` block.
pub const POINTS_PER_LINE: usize = 2;

/// Faces written per line in a `coordIndex [ ... ]` block.
pub const FACES_PER_LINE: usize = 4;

// =============================================================================
// LIMIT CONSTANTS
// =============================================================================

/// Maximum number of vertices in a single mesh fragment.
///
/// Safety limit so a runaway sweep fails fast instead of exhausting memory.
///
/// # Example
///
/// ```rust
/// use config::constants::MAX_VERTICES;
///
/// let vertex_count = 64 * 500; // 64-sided wire, 500 path samples
/// assert!(vertex_count < MAX_VERTICES);
/// ```
pub const MAX_VERTICES: usize = 10_000_000;

// =============================================================================
// SETTINGS
// =============================================================================

/// Tunable settings shared by the geometry engine and the scene writer.
///
/// # Examples
/// ```
/// use config::constants::MeshSettings;
/// let settings = MeshSettings::default();
/// assert!(settings.merge_tolerance > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshSettings {
    /// Distance below which consecutive vertices are merged.
    pub merge_tolerance: f64,
    /// Decimal places written for coordinates.
    pub coordinate_precision: usize,
}

impl MeshSettings {
    /// Builds settings, rejecting a non-positive tolerance or a precision
    /// outside `1..=12`.
    ///
    /// # Examples
    /// ```
    /// use config::constants::MeshSettings;
    /// let settings = MeshSettings::new(1.0e-6, 6).expect("valid settings");
    /// assert_eq!(settings.coordinate_precision, 6);
    /// assert!(MeshSettings::new(0.0, 6).is_err());
    /// ```
    pub fn new(merge_tolerance: f64, coordinate_precision: usize) -> Result<Self, ConfigError> {
        if !(merge_tolerance > 0.0) {
            return Err(ConfigError::InvalidTolerance(merge_tolerance));
        }
        if !(1..=12).contains(&coordinate_precision) {
            return Err(ConfigError::InvalidPrecision(coordinate_precision));
        }
        Ok(Self {
            merge_tolerance,
            coordinate_precision,
        })
    }
}

impl Default for MeshSettings {
    fn default() -> Self {
        Self {
            merge_tolerance: VERTEX_MERGE_EPSILON,
            coordinate_precision: COORDINATE_PRECISION,
        }
    }
}

/// Error returned when invalid settings are provided.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// Raised when the merge tolerance is zero, negative or NaN.
    InvalidTolerance(f64),
    /// Raised when the coordinate precision is out of range.
    InvalidPrecision(usize),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidTolerance(value) => {
                write!(f, "merge tolerance must be positive: {value}")
            }
            ConfigError::InvalidPrecision(value) => {
                write!(f, "coordinate precision must be in 1..=12: {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Checks if two f64 values are approximately equal within EPSILON.
///
/// # Example
///
/// ```rust
/// use config::constants::approx_equal;
///
/// assert!(approx_equal(1.0, 1.0 + 1e-11));
/// assert!(!approx_equal(1.0, 1.1));
/// ```
#[inline]
pub fn approx_equal(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// Checks if a f64 value is approximately zero within EPSILON.
///
/// # Example
///
/// ```rust
/// use config::constants::approx_zero;
///
/// assert!(approx_zero(1e-11));
/// assert!(!approx_zero(0.1));
/// ```
#[inline]
pub fn approx_zero(value: f64) -> bool {
    value.abs() < EPSILON
}
