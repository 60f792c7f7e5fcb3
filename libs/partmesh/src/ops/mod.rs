//! # Mesh Operations
//!
//! Operations that turn rings into mesh fragments.
//!
//! ## Operations
//!
//! - **stitch**: band of quads between two corresponding rings
//! - **paint**: flat face closing a ring
//! - **extrude**: one sweep step with optional caps
//! - **draft**: shrink/grow factor pairs for tapered bodies
//! - **dimple**: spherical cap closing a circular opening
//! - **wire**: sweep along a bent polyline
//! - **tessellate**: planar caps with holes

pub mod dimple;
pub mod draft;
pub mod extrude;
pub mod stitch;
pub mod tessellate;
pub mod wire;

pub use dimple::{sphere_radius, DimpleParams};
pub use draft::{draft_step, DraftFactors};
pub use extrude::{extrude, extrude_chain, ExtrudeParams, Extrusion, Facing};
pub use stitch::{paint, paint_tessellated, stitch};
pub use tessellate::{Tessellation, Tessellator};
pub use wire::{Centerline, PathSample, Wire, WireBuildOptions, WireParams, WireSweep};
