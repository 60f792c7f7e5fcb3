//! # Partmesh
//!
//! Polygon-mesh construction for parametric electronic component models.
//! Turns 2D cross-section profiles into watertight 3D meshes by stitching,
//! extruding and sweeping corresponding rings.
//!
//! ## Architecture
//!
//! ```text
//! parameters → ring (circle / rectangle / polygon) → ops → MeshFragment
//! ```
//!
//! ## Building Blocks
//!
//! - **Transform**: scale, rotate, translate (always in that order)
//! - **Rings**: index-corresponding profiles from pure `calc` functions
//! - **Stitch / Paint**: side bands and flat caps
//! - **Extrude / Draft**: single sweep steps and tapered stacks
//! - **Dimple**: spherical caps for polarity marks
//! - **Wire**: sweeps along polylines with rounded bends
//! - **Tessellator**: caps with holes (ear clipping)
//!
//! ## Usage
//!
//! ```rust
//! use partmesh::{extrude, CircleParams, ExtrudeParams, Transform};
//! use glam::DVec3;
//!
//! let ring = CircleParams { vertices: 24 }
//!     .calc(0.5, 0.5, &Transform::identity())
//!     .unwrap();
//! let cylinder = extrude(&ring, &ExtrudeParams::solid(DVec3::Z * 2.0)).unwrap();
//! assert_eq!(cylinder.fragment.face_count(), 24 + 2);
//! ```

pub mod error;
pub mod mesh;
pub mod ops;
pub mod ring;
pub mod transform;

pub use error::{MeshError, MeshResult};
pub use mesh::MeshFragment;
pub use ops::{
    draft_step, extrude, extrude_chain, paint, paint_tessellated, sphere_radius, stitch, Centerline,
    DimpleParams, DraftFactors, ExtrudeParams, Extrusion, Facing, PathSample, Tessellation, Tessellator,
    Wire, WireBuildOptions, WireParams, WireSweep,
};
pub use ring::{CircleParams, RectangleParams, Ring, SimplePoly, Winding};
pub use transform::Transform;

#[cfg(test)]
mod tests;
