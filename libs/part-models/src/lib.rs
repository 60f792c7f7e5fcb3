//! # Part Models
//!
//! Parametric electronic component bodies built from `partmesh` operations
//! and written with `vrml-scene`.
//!
//! ## Models
//!
//! - **Header**: beveled case with pin openings and tapered pins
//! - **QFP body**: chamfer and draft stack with a polarity dot
//! - **Coil**: helical wire with straight leads
//!
//! Parameter structs deserialize with `serde`; missing fields take their
//! documented defaults. Every model validates its parameters before any
//! geometry is produced.
//!
//! ## Usage
//!
//! ```rust
//! use part_models::{Header, HeaderMaterials, HeaderParams};
//! use partmesh::Transform;
//! use vrml_scene::{Material, SceneWriter};
//!
//! let materials = HeaderMaterials {
//!     case: Material::new("Case").unwrap().with_diffuse([0.1, 0.1, 0.1]).unwrap(),
//!     pins: Material::new("Pin").unwrap().with_diffuse([0.8, 0.7, 0.2]).unwrap(),
//! };
//! let header = Header::new(HeaderParams::default()).unwrap();
//!
//! let mut writer = SceneWriter::new(Vec::new()).unwrap();
//! header.build(&mut writer, "HDR_1x3", &Transform::identity(), &materials).unwrap();
//! writer.finish().unwrap();
//! ```

pub mod coil;
pub mod error;
pub mod header;
pub mod qfp;

pub use coil::{coil_path, Coil, CoilParams};
pub use error::{ModelError, ModelResult};
pub use header::{Header, HeaderCase, HeaderMaterials, HeaderParams, HeaderPins, PinShape};
pub use qfp::{QfpBody, QfpMeshes, QfpParams};
