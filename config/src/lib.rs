//! # Config Crate
//!
//! Centralized configuration constants for the component mesh pipeline.
//! Every tolerance, limit and formatting parameter used by the geometry
//! engine and the scene writer is defined here so that the crates agree on
//! what "equal", "too small" and "too many" mean.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{EPSILON, DEFAULT_CIRCLE_VERTICES, MIN_RING_VERTICES};
//!
//! // Use EPSILON for floating-point comparisons
//! let value: f64 = 0.00000000001; // 1e-11, smaller than EPSILON (1e-10)
//! assert!(value.abs() < EPSILON);
//!
//! // Circles default to a 16-sided ring
//! assert!(DEFAULT_CIRCLE_VERTICES >= MIN_RING_VERTICES);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Millimetre Units**: Limits assume part dimensions in millimetres
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;

#[cfg(test)]
mod tests;
