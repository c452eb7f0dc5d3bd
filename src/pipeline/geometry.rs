//! Geometry stage: mesh faces to a depth-tagged screen triangle list
//!
//! Recovery policy: a face or triangle that references missing geometry,
//! lands behind the camera, falls outside the horizontal margin or faces
//! away is dropped from this frame only. Nothing here fails the frame.

use super::state::RenderState;
use super::transform::{Normalization, Projection, ScreenVertex};
use crate::config::RenderConfig;
use crate::error::{ClipError, GeometryError, TriangleError};
use crate::mesh::{FaceCorner, Mesh};
use crate::rasterizer::{signed_area2, Vec2};
use crate::shaders::ShaderBinding;

/// Screen-space triangle ready for compositing. Lives for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle<'m> {
    pub points: [(i32, i32); 3],
    pub uvs: [Option<Vec2>; 3],
    /// Mean camera-space Z of the three corners; larger is farther
    pub depth: f32,
    pub material: Option<&'m str>,
}

impl<'m> Triangle<'m> {
    /// Integer (floored) mean of the three screen points
    pub fn centroid(&self) -> (i32, i32) {
        let sx: i64 = self.points.iter().map(|p| p.0 as i64).sum();
        let sy: i64 = self.points.iter().map(|p| p.1 as i64).sum();
        (sx.div_euclid(3) as i32, sy.div_euclid(3) as i32)
    }

    pub fn signed_area2(&self) -> i64 {
        signed_area2(self.points[0], self.points[1], self.points[2])
    }
}

/// Counts of what happened to each candidate triangle in a frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GeometryStats {
    pub emitted: usize,
    pub clipped: usize,
    pub malformed: usize,
}

/// Per-mesh geometry settings, fixed after load
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryStage {
    pub normalization: Normalization,
    pub projection: Projection,
    pub cull_margin: i32,
}

impl GeometryStage {
    /// None for a mesh with no vertices
    pub fn new(mesh: &Mesh, config: &RenderConfig) -> Option<Self> {
        let bounds = mesh.bounds()?;
        Some(Self {
            normalization: Normalization::from_bounds(&bounds, config.camera.target_size),
            projection: Projection::new(
                &config.camera,
                config.surface.width,
                config.surface.height,
            ),
            cull_margin: config.camera.cull_margin,
        })
    }

    /// Build this frame's visible triangles in face order
    pub fn build<'m>(
        &self,
        mesh: &'m Mesh,
        state: &RenderState,
        shader: &ShaderBinding,
    ) -> (Vec<Triangle<'m>>, GeometryStats) {
        let model = self.normalization.model_matrix(state.rotation_angle);
        let time = state.animation_time;

        // Vertex stage: once per mesh vertex
        let projected: Vec<Result<ScreenVertex, ClipError>> = mesh
            .vertices
            .iter()
            .map(|&v| {
                let displaced = shader.displace(v, time);
                self.projection.project(model.transform_point(displaced))
            })
            .collect();

        let mut triangles = Vec::with_capacity(mesh.faces.len());
        let mut stats = GeometryStats::default();

        for face in &mesh.faces {
            if face.corners.len() < 3 {
                log::trace!("{}", GeometryError::ShortLoop(face.corners.len()));
                stats.malformed += 1;
                continue;
            }

            for corners in face.fan() {
                match self.assemble(mesh, &projected, corners, face.material.as_deref()) {
                    Ok(tri) => {
                        triangles.push(tri);
                        stats.emitted += 1;
                    }
                    Err(TriangleError::Geometry(_)) => stats.malformed += 1,
                    Err(_) => stats.clipped += 1,
                }
            }
        }

        (triangles, stats)
    }

    fn assemble<'m>(
        &self,
        mesh: &'m Mesh,
        projected: &[Result<ScreenVertex, ClipError>],
        corners: [FaceCorner; 3],
        material: Option<&'m str>,
    ) -> Result<Triangle<'m>, TriangleError> {
        let mut screen = [ScreenVertex { x: 0, y: 0, z: 0.0 }; 3];
        for (slot, corner) in screen.iter_mut().zip(corners.iter()) {
            let vertex = projected
                .get(corner.vertex)
                .ok_or(GeometryError::VertexOutOfRange {
                    index: corner.vertex,
                    count: projected.len(),
                })?;
            *slot = (*vertex)?;
        }

        let min_x = -self.cull_margin;
        let max_x = self.projection.width as i32 + self.cull_margin;
        if screen.iter().any(|s| s.x < min_x || s.x > max_x) {
            return Err(ClipError::OffScreen.into());
        }

        let tri = Triangle {
            points: [
                (screen[0].x, screen[0].y),
                (screen[1].x, screen[1].y),
                (screen[2].x, screen[2].y),
            ],
            uvs: [
                mesh.texcoord(corners[0].uv),
                mesh.texcoord(corners[1].uv),
                mesh.texcoord(corners[2].uv),
            ],
            depth: (screen[0].z + screen[1].z + screen[2].z) / 3.0,
            material,
        };
        if tri.signed_area2() <= 0 {
            return Err(ClipError::BackFacing.into());
        }
        Ok(tri)
    }
}
