//! Model-to-screen transform
//!
//! The mesh is recentered and scaled once at load, then spun about the
//! vertical axis every frame and pushed through a fixed pinhole projection.

use crate::config::CameraConfig;
use crate::error::ClipError;
use crate::mesh::Bounds;
use crate::rasterizer::{Mat4, Vec3};

/// One-time recentering and uniform scale for a mesh
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalization {
    pub center: Vec3,
    pub scale: f32,
}

impl Normalization {
    /// `center = (min + max) / 2`, `scale = target_size / max(extent)`.
    /// A flat point cloud (zero extent) keeps unit extent.
    pub fn from_bounds(bounds: &Bounds, target_size: f32) -> Self {
        let extent = bounds.extent().max_element();
        let scale = if extent > 0.0 && extent.is_finite() {
            target_size / extent
        } else {
            target_size
        };
        Self {
            center: bounds.center(),
            scale,
        }
    }

    /// Per-frame model matrix: rotate * scale * translate(-center)
    pub fn model_matrix(&self, rotation_angle: f32) -> Mat4 {
        Mat4::rotation_y(rotation_angle)
            * Mat4::uniform_scale(self.scale)
            * Mat4::translation(self.center * -1.0)
    }
}

/// Camera-space point projected to integer screen coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenVertex {
    pub x: i32,
    pub y: i32,
    /// Camera-space Z before the perspective divide
    pub z: f32,
}

/// Pinhole projection onto a `width` x `height` surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub distance: f32,
    pub focal: f32,
    pub width: usize,
    pub height: usize,
}

impl Projection {
    pub fn new(camera: &CameraConfig, width: usize, height: usize) -> Self {
        Self {
            distance: camera.distance,
            focal: camera.focal,
            width,
            height,
        }
    }

    /// `x * F / (z + D) + W/2`, `-y * F / (z + D) + H/2`, truncated toward zero.
    pub fn project(&self, p: Vec3) -> Result<ScreenVertex, ClipError> {
        if !p.is_finite() {
            return Err(ClipError::NonFinite);
        }
        let denom = p.z + self.distance;
        if denom <= 0.0 {
            return Err(ClipError::BehindCamera);
        }

        let k = self.focal / denom;
        let sx = p.x * k + (self.width / 2) as f32;
        let sy = -p.y * k + (self.height / 2) as f32;

        // Saturating casts; far-off coordinates are rejected downstream
        Ok(ScreenVertex {
            x: sx as i32,
            y: sy as i32,
            z: p.z,
        })
    }
}
