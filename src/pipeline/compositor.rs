//! Compositing: color resolution, fragment stage and triangle fill
//!
//! Two interchangeable strategies:
//! - Painter's algorithm (default): stable back-to-front sort, then fill
//! - Z-buffer: per-pixel depth test using each triangle's flat depth

use super::geometry::Triangle;
use crate::config::{CompositorKind, ShadingConfig};
use crate::rasterizer::{for_each_span, Color, DepthBuffer, Framebuffer, Line, Rgb, Texture};
use crate::shaders::ShaderBinding;

/// Darkening applied to the fill color for the optional contour
const OUTLINE_SHADE: f32 = 0.6;

/// Everything needed to color a triangle this frame
pub struct ShadeContext<'a> {
    pub texture: &'a Texture,
    pub shader: &'a ShaderBinding,
    pub time: f32,
    pub shading: &'a ShadingConfig,
}

impl<'a> ShadeContext<'a> {
    /// Average of the three corner samples (floored). A corner without a UV
    /// contributes the fallback color. Material tints apply per sample.
    pub fn base_color(&self, tri: &Triangle) -> Color {
        let tint = tri.material.and_then(|m| self.shading.material_tints.get(m));

        let (mut r, mut g, mut b) = (0u32, 0u32, 0u32);
        for uv in &tri.uvs {
            let sample = match uv {
                Some(uv) => self.texture.sample(uv.x, uv.y),
                None => self.shading.fallback_color,
            };
            let sample = tint.map_or(sample, |t| t.apply(sample));
            r += sample.r as u32;
            g += sample.g as u32;
            b += sample.b as u32;
        }
        Color::new((r / 3) as u8, (g / 3) as u8, (b / 3) as u8)
    }

    /// `max(bias - depth * scale, floor)`; nearer triangles get a larger factor
    pub fn depth_factor(&self, depth: f32) -> f32 {
        (self.shading.depth_bias - depth * self.shading.depth_scale).max(self.shading.depth_floor)
    }

    /// Final flat color: base color, fragment shader (clamped), depth dimming
    pub fn triangle_color(&self, tri: &Triangle) -> Color {
        let base = Rgb::from(self.base_color(tri));
        let shaded = self.shader.shade(base, self.time, Some(tri.centroid()), tri.depth);
        shaded.scaled(self.depth_factor(tri.depth))
    }
}

/// What happened while compositing one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompositeStats {
    pub drawn: usize,
    pub skipped: usize,
}

/// A strategy for resolving visibility between the frame's triangles
pub trait Compositor {
    fn kind(&self) -> CompositorKind;

    /// Draw `triangles` into `fb`. May reorder the slice.
    fn composite(
        &mut self,
        fb: &mut Framebuffer,
        triangles: &mut [Triangle],
        ctx: &ShadeContext,
    ) -> CompositeStats;
}

/// Build the compositor for a given strategy
pub fn make_compositor(kind: CompositorKind) -> Box<dyn Compositor> {
    match kind {
        CompositorKind::Painter => Box::new(PainterCompositor),
        CompositorKind::ZBuffer => Box::new(ZBufferCompositor::default()),
    }
}

/// Sort farthest-first and overdraw. Equal depths keep emission order.
#[derive(Debug, Default)]
pub struct PainterCompositor;

impl Compositor for PainterCompositor {
    fn kind(&self) -> CompositorKind {
        CompositorKind::Painter
    }

    fn composite(
        &mut self,
        fb: &mut Framebuffer,
        triangles: &mut [Triangle],
        ctx: &ShadeContext,
    ) -> CompositeStats {
        triangles.sort_by(|a, b| b.depth.total_cmp(&a.depth));

        let mut stats = CompositeStats::default();
        for tri in triangles.iter() {
            let color = ctx.triangle_color(tri);
            match fb.fill_triangle(tri.points, color) {
                Ok(()) => {
                    if ctx.shading.outline {
                        fb.draw_triangle_wireframe(tri.points, color.scaled(OUTLINE_SHADE));
                    }
                    stats.drawn += 1;
                }
                Err(e) => {
                    log::trace!("Skipped triangle: {}", e);
                    stats.skipped += 1;
                }
            }
        }
        stats
    }
}

/// Per-pixel nearest-wins using each triangle's flat depth
#[derive(Default)]
pub struct ZBufferCompositor {
    depth: Option<DepthBuffer>,
}

impl Compositor for ZBufferCompositor {
    fn kind(&self) -> CompositorKind {
        CompositorKind::ZBuffer
    }

    fn composite(
        &mut self,
        fb: &mut Framebuffer,
        triangles: &mut [Triangle],
        ctx: &ShadeContext,
    ) -> CompositeStats {
        let depth = self
            .depth
            .get_or_insert_with(|| DepthBuffer::new(fb.width, fb.height));
        depth.fit(fb.width, fb.height);

        let mut stats = CompositeStats::default();
        for tri in triangles.iter() {
            let color = ctx.triangle_color(tri);
            let z = tri.depth;

            let filled = for_each_span(tri.points, fb.width, fb.height, |y, x0, x1| {
                for x in x0..=x1 {
                    if depth.test_and_set(x, y, z) {
                        fb.set_pixel(x, y, color);
                    }
                }
            });

            match filled {
                Ok(()) => {
                    if ctx.shading.outline {
                        let edge = color.scaled(OUTLINE_SHADE);
                        for i in 0..3 {
                            let (a, b) = (tri.points[i], tri.points[(i + 1) % 3]);
                            for (x, y) in Line::new(a, b) {
                                if depth.is_visible(x, y, z) {
                                    fb.set_pixel(x, y, edge);
                                }
                            }
                        }
                    }
                    stats.drawn += 1;
                }
                Err(e) => {
                    log::trace!("Skipped triangle: {}", e);
                    stats.skipped += 1;
                }
            }
        }
        stats
    }
}
