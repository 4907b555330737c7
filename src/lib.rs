//! NOCS (Normalized Object Coordinate Space) vertex colors for meshes.
//!
//! Every face corner of a mesh is colored with its vertex position rescaled
//! into the unit cube spanned by the mesh's own local bounding box, and a
//! small material is attached that displays that color layer.

pub mod core;
pub mod error;
pub mod io;
pub mod nocs;
pub mod scene;

pub use error::{NocsError, NocsResult};
