//! Core color and texture types for the rasterizer

use serde::{Deserialize, Serialize};

/// RGBA color (0-255 per channel)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default = "opaque")]
    pub a: u8,
}

fn opaque() -> u8 {
    255
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0, a: 255 };
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255, a: 255 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Multiply each channel by `factor`, saturating at 255
    pub fn scaled(self, factor: f32) -> Self {
        let f = factor.max(0.0);
        Self {
            r: (self.r as f32 * f).min(255.0) as u8,
            g: (self.g as f32 * f).min(255.0) as u8,
            b: (self.b as f32 * f).min(255.0) as u8,
            a: self.a,
        }
    }

    /// Convert to [u8; 4] for the framebuffer
    pub fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<Color> for Rgb {
    fn from(c: Color) -> Self {
        Rgb::new(c.r as i32, c.g as i32, c.b as i32)
    }
}

/// Unclamped color as produced and consumed by fragment shaders.
/// Channels may leave `[0, 255]`; [`Rgb::clamped`] brings them back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: i32,
    pub g: i32,
    pub b: i32,
}

impl Rgb {
    pub const fn new(r: i32, g: i32, b: i32) -> Self {
        Self { r, g, b }
    }

    pub fn clamped(self) -> Color {
        Color::new(
            self.r.clamp(0, 255) as u8,
            self.g.clamp(0, 255) as u8,
            self.b.clamp(0, 255) as u8,
        )
    }
}

/// RGB texture (row-major, origin top-left)
#[derive(Debug, Clone)]
pub struct Texture {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<Color>,
    pub name: String,
}

impl Texture {
    /// Solid single-color grid used when no texture image is available
    pub fn solid(width: usize, height: usize, color: Color) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            pixels: vec![color; width * height],
            name: "fallback".to_string(),
        }
    }

    /// Load texture from an image file (PNG, JPEG or BMP)
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, image::ImageError> {
        let path = path.as_ref();
        let rgb = image::open(path)?.to_rgb8();
        let (width, height) = rgb.dimensions();

        let pixels: Vec<Color> = rgb.pixels().map(|p| Color::new(p[0], p[1], p[2])).collect();

        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();

        Ok(Self {
            width: width as usize,
            height: height as usize,
            pixels,
            name,
        })
    }

    /// Nearest-neighbor sample. UV is clamped to [0, 1] and V is flipped,
    /// since UV origin is bottom-left and texel origin is top-left.
    pub fn sample(&self, u: f32, v: f32) -> Color {
        // NaN clamps to NaN; treat it as the origin
        let u = if u.is_nan() { 0.0 } else { u.clamp(0.0, 1.0) };
        let v = if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) };

        let px = ((u * (self.width - 1) as f32) as usize).min(self.width - 1);
        let py = (((1.0 - v) * (self.height - 1) as f32) as usize).min(self.height - 1);
        self.get_pixel(px, py)
    }

    /// Get pixel at x,y coordinates
    pub fn get_pixel(&self, x: usize, y: usize) -> Color {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x]
        } else {
            Color::BLACK
        }
    }
}
