//! Target surface and primitive drawing
//! Bounded pixel writes, Bresenham lines and triangle scan-fill

use super::math::signed_area2;
use super::types::Color;
use crate::error::RasterizeError;

/// Screen coordinates beyond this magnitude are rejected before filling
/// or line walking, so a near-camera vertex cannot stall a frame.
pub const COORD_LIMIT: i32 = 1 << 15;

/// RGBA surface for software rendering
pub struct Framebuffer {
    pub pixels: Vec<u8>, // RGBA, 4 bytes per pixel
    pub width: usize,
    pub height: usize,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: vec![0; width * height * 4],
            width,
            height,
        }
    }

    pub fn clear(&mut self, color: Color) {
        let bytes = color.to_bytes();
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&bytes);
        }
    }

    /// Write a pixel; out-of-bounds writes are dropped
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if let Some(idx) = self.index(x, y) {
            self.pixels[idx * 4..idx * 4 + 4].copy_from_slice(&color.to_bytes());
        }
    }

    pub fn get_pixel(&self, x: i32, y: i32) -> Option<Color> {
        self.index(x, y).map(|idx| {
            let p = &self.pixels[idx * 4..idx * 4 + 4];
            Color { r: p[0], g: p[1], b: p[2], a: p[3] }
        })
    }

    /// Linear pixel index, or None when (x, y) lies outside the surface
    pub fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            Some(y as usize * self.width + x as usize)
        } else {
            None
        }
    }

    /// Draw a line from (x0, y0) to (x1, y1) using Bresenham's algorithm
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
        if [x0, y0, x1, y1].iter().any(|c| c.abs() > COORD_LIMIT) {
            return;
        }
        for (x, y) in Line::new((x0, y0), (x1, y1)) {
            self.set_pixel(x, y, color);
        }
    }

    /// Outline a triangle with three lines
    pub fn draw_triangle_wireframe(&mut self, pts: [(i32, i32); 3], color: Color) {
        for i in 0..3 {
            let (a, b) = (pts[i], pts[(i + 1) % 3]);
            self.draw_line(a.0, a.1, b.0, b.1, color);
        }
    }

    /// Fill a triangle with a single color
    pub fn fill_triangle(
        &mut self,
        pts: [(i32, i32); 3],
        color: Color,
    ) -> Result<(), RasterizeError> {
        let (width, height) = (self.width, self.height);
        for_each_span(pts, width, height, |y, x0, x1| {
            for x in x0..=x1 {
                self.set_pixel(x, y, color);
            }
        })
    }
}

/// Walk the horizontal spans covering a triangle, clipped to a `width` x `height`
/// surface. Edges are inclusive. Fails on zero-area or out-of-range input.
pub fn for_each_span<F>(
    pts: [(i32, i32); 3],
    width: usize,
    height: usize,
    mut span: F,
) -> Result<(), RasterizeError>
where
    F: FnMut(i32, i32, i32),
{
    if pts.iter().any(|p| p.0.abs() > COORD_LIMIT || p.1.abs() > COORD_LIMIT) {
        return Err(RasterizeError::CoordinateOverflow);
    }
    if signed_area2(pts[0], pts[1], pts[2]) == 0 {
        return Err(RasterizeError::Degenerate);
    }

    let min_y = pts.iter().map(|p| p.1).min().unwrap_or(0).max(0);
    let max_y = pts.iter().map(|p| p.1).max().unwrap_or(0).min(height as i32 - 1);

    for y in min_y..=max_y {
        let mut lo = f32::INFINITY;
        let mut hi = f32::NEG_INFINITY;

        for i in 0..3 {
            let (a, b) = (pts[i], pts[(i + 1) % 3]);
            if a.1 == b.1 {
                if a.1 == y {
                    lo = lo.min(a.0.min(b.0) as f32);
                    hi = hi.max(a.0.max(b.0) as f32);
                }
                continue;
            }
            if y < a.1.min(b.1) || y > a.1.max(b.1) {
                continue;
            }
            let t = (y - a.1) as f32 / (b.1 - a.1) as f32;
            let x = a.0 as f32 + t * (b.0 - a.0) as f32;
            lo = lo.min(x);
            hi = hi.max(x);
        }

        if lo > hi {
            continue;
        }
        let x0 = (lo.round() as i32).max(0);
        let x1 = (hi.round() as i32).min(width as i32 - 1);
        if x0 <= x1 {
            span(y, x0, x1);
        }
    }

    Ok(())
}

/// Lazy Bresenham walk between two integer endpoints (both included).
/// Steep lines swap the X/Y roles so the loop always steps along the major axis.
#[derive(Debug, Clone)]
pub struct Line {
    x: i32,
    x_end: i32,
    y: i32,
    y_step: i32,
    dx: i32,
    dy: i32,
    error: i32,
    steep: bool,
}

impl Line {
    pub fn new(from: (i32, i32), to: (i32, i32)) -> Self {
        let (mut x0, mut y0) = from;
        let (mut x1, mut y1) = to;

        let steep = (y1 - y0).abs() > (x1 - x0).abs();
        if steep {
            std::mem::swap(&mut x0, &mut y0);
            std::mem::swap(&mut x1, &mut y1);
        }
        if x0 > x1 {
            std::mem::swap(&mut x0, &mut x1);
            std::mem::swap(&mut y0, &mut y1);
        }

        let dx = x1 - x0;
        let dy = (y1 - y0).abs();
        Self {
            x: x0,
            x_end: x1,
            y: y0,
            y_step: if y0 < y1 { 1 } else { -1 },
            dx,
            dy,
            error: dx / 2,
            steep,
        }
    }
}

impl Iterator for Line {
    type Item = (i32, i32);

    fn next(&mut self) -> Option<(i32, i32)> {
        if self.x > self.x_end {
            return None;
        }
        let point = if self.steep { (self.y, self.x) } else { (self.x, self.y) };

        self.error -= self.dy;
        if self.error < 0 {
            self.y += self.y_step;
            self.error += self.dx;
        }
        self.x += 1;

        Some(point)
    }
}

/// Per-pixel depth grid, +inf when empty. Smaller values are nearer.
pub struct DepthBuffer {
    depths: Vec<f32>,
    pub width: usize,
    pub height: usize,
}

impl DepthBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            depths: vec![f32::INFINITY; width * height],
            width,
            height,
        }
    }

    pub fn clear(&mut self) {
        self.depths.fill(f32::INFINITY);
    }

    /// Resize to match a surface, clearing in the process
    pub fn fit(&mut self, width: usize, height: usize) {
        if self.width != width || self.height != height {
            *self = DepthBuffer::new(width, height);
        } else {
            self.clear();
        }
    }

    /// Record `depth` at (x, y) if it is nearer than what is stored.
    /// Returns whether the caller should write the pixel.
    pub fn test_and_set(&mut self, x: i32, y: i32, depth: f32) -> bool {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return false;
        }
        let idx = y as usize * self.width + x as usize;
        if depth < self.depths[idx] {
            self.depths[idx] = depth;
            true
        } else {
            false
        }
    }

    /// Whether something at `depth` would be visible at (x, y) without recording it
    pub fn is_visible(&self, x: i32, y: i32, depth: f32) -> bool {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return false;
        }
        depth <= self.depths[y as usize * self.width + x as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_shallow_and_steep_endpoints() {
        let shallow: Vec<_> = Line::new((0, 0), (5, 2)).collect();
        assert_eq!(shallow.len(), 6);
        assert_eq!(shallow.first(), Some(&(0, 0)));
        assert_eq!(shallow.last(), Some(&(5, 2)));

        let steep: Vec<_> = Line::new((0, 0), (2, 7)).collect();
        assert_eq!(steep.len(), 8);
        assert_eq!(steep.first(), Some(&(0, 0)));
        assert_eq!(steep.last(), Some(&(2, 7)));
    }

    #[test]
    fn test_line_reversed_covers_same_pixels() {
        let mut a: Vec<_> = Line::new((3, 9), (-4, 1)).collect();
        let mut b: Vec<_> = Line::new((-4, 1), (3, 9)).collect();
        a.sort();
        b.sort();
        assert_eq!(a, b);
    }

    #[test]
    fn test_line_single_point() {
        let pts: Vec<_> = Line::new((4, 4), (4, 4)).collect();
        assert_eq!(pts, vec![(4, 4)]);
    }

    #[test]
    fn test_line_steps_are_adjacent() {
        let pts: Vec<_> = Line::new((-10, 3), (17, -8)).collect();
        for w in pts.windows(2) {
            assert!((w[0].0 - w[1].0).abs() <= 1);
            assert!((w[0].1 - w[1].1).abs() <= 1);
        }
    }

    #[test]
    fn test_draw_line_drops_out_of_bounds() {
        let mut fb = Framebuffer::new(4, 4);
        fb.draw_line(-5, 1, 10, 1, Color::WHITE);
        for x in 0..4 {
            assert_eq!(fb.get_pixel(x, 1), Some(Color::WHITE));
        }
        assert_eq!(fb.get_pixel(0, 0), Some(Color { r: 0, g: 0, b: 0, a: 0 }));
    }

    #[test]
    fn test_fill_triangle_covers_centroid_and_vertices() {
        let mut fb = Framebuffer::new(20, 20);
        let red = Color::new(255, 0, 0);
        fb.fill_triangle([(2, 2), (17, 2), (2, 17)], red).unwrap();
        assert_eq!(fb.get_pixel(7, 7), Some(red));
        assert_eq!(fb.get_pixel(2, 2), Some(red));
        assert_eq!(fb.get_pixel(17, 2), Some(red));
        assert_ne!(fb.get_pixel(16, 16), Some(red));
    }

    #[test]
    fn test_fill_triangle_rejects_degenerate() {
        let mut fb = Framebuffer::new(10, 10);
        let res = fb.fill_triangle([(1, 1), (5, 5), (9, 9)], Color::WHITE);
        assert_eq!(res, Err(RasterizeError::Degenerate));
    }

    #[test]
    fn test_fill_triangle_rejects_overflowing_coordinates() {
        let mut fb = Framebuffer::new(10, 10);
        let res = fb.fill_triangle([(0, 0), (5, i32::MAX), (9, 0)], Color::WHITE);
        assert_eq!(res, Err(RasterizeError::CoordinateOverflow));
    }

    #[test]
    fn test_fill_partially_offscreen_is_clipped() {
        let mut fb = Framebuffer::new(10, 10);
        fb.fill_triangle([(-50, -50), (60, -50), (-50, 60)], Color::WHITE).unwrap();
        assert_eq!(fb.get_pixel(0, 0), Some(Color::WHITE));
    }

    #[test]
    fn test_depth_buffer_keeps_nearest() {
        let mut db = DepthBuffer::new(2, 2);
        assert!(db.test_and_set(1, 1, 5.0));
        assert!(!db.test_and_set(1, 1, 9.0));
        assert!(db.test_and_set(1, 1, 1.0));
        assert!(!db.test_and_set(2, 0, 0.0));
        assert!(db.is_visible(1, 1, 1.0));
        assert!(!db.is_visible(1, 1, 1.5));
        db.clear();
        assert!(db.test_and_set(1, 1, 9.0));
    }
}
