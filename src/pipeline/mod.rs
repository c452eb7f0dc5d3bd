//! Per-frame rendering pipeline
//!
//! state -> transform -> geometry -> compositor. Each stage reads the
//! frame's [`RenderState`] and the loaded mesh; only the compositor writes
//! to the surface.

mod compositor;
mod geometry;
mod state;
mod transform;

pub use compositor::*;
pub use geometry::*;
pub use state::*;
pub use transform::*;
