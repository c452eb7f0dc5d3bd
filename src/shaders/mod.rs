//! Swappable shader stages
//!
//! A shader is a named pair of plain functions: one displaces each vertex,
//! the other colors each triangle. Function pointers cannot capture state,
//! so every binding is pure and can be called from anywhere without locking.

mod library;

pub use library::*;

use crate::rasterizer::{Color, Rgb, Vec3};

/// Displace a model-space position at animation time `t`
pub type VertexShader = fn(position: Vec3, time: f32) -> Vec3;

/// Color a triangle. `screen` is the triangle's screen-space centroid when
/// known; `depth` is its camera-space depth. Output may leave `[0, 255]`.
pub type FragmentShader = fn(base: Rgb, time: f32, screen: Option<(i32, i32)>, depth: f32) -> Rgb;

/// A named vertex + fragment shader pair
#[derive(Clone, Copy)]
pub struct ShaderBinding {
    pub name: &'static str,
    pub vertex: VertexShader,
    pub fragment: FragmentShader,
}

impl std::fmt::Debug for ShaderBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShaderBinding").field("name", &self.name).finish()
    }
}

impl ShaderBinding {
    pub const fn new(name: &'static str, vertex: VertexShader, fragment: FragmentShader) -> Self {
        Self { name, vertex, fragment }
    }

    pub fn displace(&self, position: Vec3, time: f32) -> Vec3 {
        (self.vertex)(position, time)
    }

    /// Run the fragment stage and clamp each channel to `[0, 255]`
    pub fn shade(&self, base: Rgb, time: f32, screen: Option<(i32, i32)>, depth: f32) -> Color {
        (self.fragment)(base, time, screen, depth).clamped()
    }
}

/// Ordered, fixed catalog of shader bindings. Never empty.
#[derive(Debug, Clone)]
pub struct ShaderRegistry {
    bindings: Vec<ShaderBinding>,
}

impl ShaderRegistry {
    /// The built-in effects, in key order
    pub fn builtin() -> Self {
        Self { bindings: BUILTIN_SHADERS.to_vec() }
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Clamp a requested index into `[0, len - 1]`
    pub fn select(&self, index: usize) -> usize {
        index.min(self.bindings.len() - 1)
    }

    /// Binding at `index`, clamped
    pub fn get(&self, index: usize) -> &ShaderBinding {
        &self.bindings[self.select(index)]
    }

    pub fn iter(&self) -> impl Iterator<Item = &ShaderBinding> {
        self.bindings.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_select_clamps_past_end() {
        let registry = ShaderRegistry::builtin();
        assert_eq!(registry.len(), 4);
        assert_eq!(registry.select(7), 3);
        assert_eq!(registry.select(usize::MAX), 3);
        assert_eq!(registry.select(2), 2);
        assert_eq!(registry.get(7).name, registry.get(3).name);
    }

    #[test]
    fn test_names_unique() {
        let registry = ShaderRegistry::builtin();
        let mut names: Vec<_> = registry.iter().map(|b| b.name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), registry.len());
    }

    #[rstest]
    fn test_vertex_shader_is_pure(#[values(0, 1, 2, 3)] index: usize) {
        let binding = *ShaderRegistry::builtin().get(index);
        let points = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.5, -0.25, 3.0),
            Vec3::new(-120.0, 40.0, 7.5),
        ];
        for t in [0.0, 0.05, 1.7, 123.45] {
            for p in points {
                assert_eq!(binding.displace(p, t), binding.displace(p, t));
            }
        }
    }

    #[rstest]
    fn test_fragment_output_clamped(#[values(0, 1, 2, 3)] index: usize) {
        let binding = *ShaderRegistry::builtin().get(index);
        let base = Rgb::new(300, -10, 128);
        for t in [0.0, 0.3, 2.0, 50.0] {
            for screen in [None, Some((0, 0)), Some((400, 400)), Some((-90, 9000))] {
                let raw = (binding.fragment)(base, t, screen, 12.0);
                let shaded = binding.shade(base, t, screen, 12.0);
                assert_eq!(shaded, raw.clamped());
                assert_eq!(shaded.a, 255);
            }
        }
    }

    #[rstest]
    fn test_fragment_total_at_integer_limits(#[values(0, 1, 2, 3)] index: usize) {
        let binding = *ShaderRegistry::builtin().get(index);
        let base = Rgb::new(i32::MAX, i32::MIN, 0);
        for t in [0.0, 0.2, 7.5] {
            for screen in [None, Some((i32::MIN, i32::MAX)), Some((i32::MAX, i32::MIN))] {
                let shaded = binding.shade(base, t, screen, 0.0);
                assert_eq!(shaded.a, 255);
            }
        }
    }

    #[rstest]
    fn test_fragment_total_without_position(#[values(0, 1, 2, 3)] index: usize) {
        let binding = *ShaderRegistry::builtin().get(index);
        let color = binding.shade(Rgb::new(255, 220, 0), 1.0, None, -50.0);
        assert_eq!(color, binding.shade(Rgb::new(255, 220, 0), 1.0, None, -50.0));
    }
}
