//! Mesh data and OBJ loading
//!
//! The pipeline only reads meshes; parsing happens once at startup.

mod model;
mod obj;

pub use model::*;
pub use obj::*;
