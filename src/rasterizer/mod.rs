//! Software rasterizer primitives
//!
//! - Vector/matrix math for the model transform
//! - Colors and nearest-neighbor textures
//! - RGBA framebuffer with bounded writes, Bresenham lines and scan-filled triangles
//! - Depth buffer for the per-pixel compositing path

mod framebuffer;
mod math;
mod types;

pub use framebuffer::*;
pub use math::*;
pub use types::*;

/// Default surface dimensions
pub const WIDTH: usize = 800;
pub const HEIGHT: usize = 800;
