//! In-memory mesh: positions, UVs, polygon faces and materials
//!
//! Built once at load time and never mutated afterwards.

use std::collections::HashMap;
use std::path::PathBuf;
use crate::rasterizer::{Vec2, Vec3};

/// Static polygon mesh
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub vertices: Vec<Vec3>,
    pub texcoords: Vec<Vec2>,
    pub faces: Vec<Face>,
    pub materials: HashMap<String, Material>,
}

impl Mesh {
    /// Axis-aligned bounds of all vertices, None for an empty mesh
    pub fn bounds(&self) -> Option<Bounds> {
        let first = *self.vertices.first()?;
        let (min, max) = self
            .vertices
            .iter()
            .fold((first, first), |(min, max), v| (min.min(*v), max.max(*v)));
        Some(Bounds { min, max })
    }

    /// UV by index; out-of-range or absent indices resolve to None
    pub fn texcoord(&self, index: Option<usize>) -> Option<Vec2> {
        index.and_then(|i| self.texcoords.get(i).copied())
    }

    /// First texture referenced by any material, in material-name order
    pub fn first_texture(&self) -> Option<&PathBuf> {
        let mut names: Vec<&String> = self.materials.keys().collect();
        names.sort();
        names
            .into_iter()
            .find_map(|n| self.materials.get(n).and_then(|m| m.texture.as_ref()))
    }
}

/// Polygon face: an ordered loop of corners (3 or more)
#[derive(Debug, Clone, Default)]
pub struct Face {
    pub corners: Vec<FaceCorner>,
    pub material: Option<String>,
}

impl Face {
    pub fn new(corners: Vec<FaceCorner>) -> Self {
        Self { corners, material: None }
    }

    pub fn with_material(corners: Vec<FaceCorner>, material: &str) -> Self {
        Self {
            corners,
            material: Some(material.to_string()),
        }
    }

    /// Fan triangulation: corners `[0, i, i + 1]` for `i` in `1..len - 1`.
    /// Loops shorter than 3 yield nothing.
    pub fn fan(&self) -> impl Iterator<Item = [FaceCorner; 3]> + '_ {
        let n = self.corners.len();
        (1..n.saturating_sub(1))
            .map(move |i| [self.corners[0], self.corners[i], self.corners[i + 1]])
    }
}

/// One corner of a face loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceCorner {
    pub vertex: usize,
    pub uv: Option<usize>,
}

impl FaceCorner {
    pub fn new(vertex: usize, uv: Option<usize>) -> Self {
        Self { vertex, uv }
    }
}

/// Material attributes
#[derive(Debug, Clone, Default)]
pub struct Material {
    pub texture: Option<PathBuf>,
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl Bounds {
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn extent(&self) -> Vec3 {
        self.max - self.min
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> Face {
        Face::new((0..4).map(|i| FaceCorner::new(i, None)).collect())
    }

    #[test]
    fn test_fan_triangulation() {
        let face = Face::new((0..5).map(|i| FaceCorner::new(i, Some(i))).collect());
        let tris: Vec<Vec<usize>> = face
            .fan()
            .map(|t| t.iter().map(|c| c.vertex).collect())
            .collect();
        assert_eq!(tris, vec![vec![0, 1, 2], vec![0, 2, 3], vec![0, 3, 4]]);
    }

    #[test]
    fn test_fan_short_loop_is_empty() {
        let face = Face::new(vec![FaceCorner::new(0, None), FaceCorner::new(1, None)]);
        assert_eq!(face.fan().count(), 0);
        assert_eq!(Face::default().fan().count(), 0);
        assert_eq!(quad().fan().count(), 2);
    }

    #[test]
    fn test_bounds() {
        let mesh = Mesh {
            vertices: vec![
                Vec3::new(-2.0, 0.0, 1.0),
                Vec3::new(2.0, 4.0, -1.0),
                Vec3::new(0.0, -4.0, 0.0),
            ],
            ..Default::default()
        };
        let b = mesh.bounds().unwrap();
        assert_eq!(b.min, Vec3::new(-2.0, -4.0, -1.0));
        assert_eq!(b.max, Vec3::new(2.0, 4.0, 1.0));
        assert_eq!(b.center(), Vec3::new(0.0, 0.0, 0.0));
        assert_eq!(b.extent().max_element(), 8.0);
        assert!(Mesh::default().bounds().is_none());
    }

    #[test]
    fn test_texcoord_lookup_bounds_checked() {
        let mesh = Mesh {
            texcoords: vec![Vec2::new(0.25, 0.75)],
            ..Default::default()
        };
        assert_eq!(mesh.texcoord(Some(0)), Some(Vec2::new(0.25, 0.75)));
        assert_eq!(mesh.texcoord(Some(1)), None);
        assert_eq!(mesh.texcoord(None), None);
    }
}
