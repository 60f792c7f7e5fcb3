//! # VRML Scene
//!
//! Streaming VRML 2.0 output for component meshes built with `partmesh`.
//!
//! ## Architecture
//!
//! ```text
//! SceneWriter ── header
//!     └── DEF name Transform { children [ Shape { appearance, geometry } ... ] }
//! ```
//!
//! Materials are loaded once ([`Material::load`]) and borrowed by every
//! shape; the first shape defines them, later shapes reuse them.
//!
//! ## Usage
//!
//! ```rust
//! use partmesh::{CircleParams, ExtrudeParams, Transform};
//! use vrml_scene::{Material, SceneWriter};
//! use glam::DVec3;
//!
//! let pin = Material::new("Pin").unwrap().with_diffuse([0.8, 0.7, 0.2]).unwrap();
//! let ring = CircleParams::default().calc(0.3, 0.3, &Transform::identity()).unwrap();
//!
//! let mut writer = SceneWriter::new(Vec::new()).unwrap();
//! writer.open_transform("PIN_1", 0).unwrap();
//! writer.extrude(&ring, &ExtrudeParams::solid(DVec3::Z * 3.0), &pin).unwrap();
//! writer.close_transform(0).unwrap();
//! writer.finish().unwrap();
//! assert_eq!(writer.shape_count(), 1);
//! ```

mod emit;
pub mod error;
mod format;
pub mod material;
pub mod name;
pub mod writer;

pub use error::{SceneError, SceneResult};
pub use material::{Material, Rgb};
pub use name::{is_valid_name, sanitize_name};
pub use writer::{write_scene, SceneWriter, VRML_HEADER};
