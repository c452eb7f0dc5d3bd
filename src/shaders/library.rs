//! Built-in shader effects
//!
//! Vertex shaders work in raw model units (before normalization), so their
//! amplitudes are relative to the source mesh size.

use super::ShaderBinding;
use crate::rasterizer::{Rgb, Vec3, HEIGHT, WIDTH};

pub const BUILTIN_SHADERS: [ShaderBinding; 4] = [
    ShaderBinding::new("BREATHING", breathing_vertex, breathing_fragment),
    ShaderBinding::new("ELECTRIC LIGHTNING", electric_vertex, electric_fragment),
    ShaderBinding::new("SOAP BUBBLE", bubble_vertex, bubble_fragment),
    ShaderBinding::new("HOLOGRAM", hologram_vertex, hologram_fragment),
];

/// Add per-channel offsets, saturating at 255
fn brighten(c: Rgb, r: i32, g: i32, b: i32) -> Rgb {
    Rgb::new(
        c.r.saturating_add(r).min(255),
        c.g.saturating_add(g).min(255),
        c.b.saturating_add(b).min(255),
    )
}

// ============================================================================
// Breathing: the mesh inflates and deflates
// ============================================================================

pub fn breathing_vertex(p: Vec3, t: f32) -> Vec3 {
    let factor = 1.0 + 0.3 * (t * 1.2).sin();
    let bounce = 0.05 * (t * 2.0).sin();
    Vec3::new(p.x * factor, p.y * factor + bounce, p.z * factor)
}

pub fn breathing_fragment(c: Rgb, t: f32, _screen: Option<(i32, i32)>, _depth: f32) -> Rgb {
    let pulse = 1.0 + 0.1 * (t * 1.5).sin();
    let ch = |v: i32| (v as f32 * pulse).min(255.0) as i32;
    Rgb::new(ch(c.r), ch(c.g), ch(c.b))
}

// ============================================================================
// Electric: jittering vertices, lightning bands across the screen
// ============================================================================

pub fn electric_vertex(p: Vec3, t: f32) -> Vec3 {
    const INTENSITY: f32 = 0.05;
    let nx = (t * 20.0 + p.x * 30.0).sin() * INTENSITY;
    let ny = (t * 25.0 + p.y * 35.0).cos() * INTENSITY;
    let nz = (t * 18.0 + p.z * 28.0).sin() * INTENSITY * 0.5;
    Vec3::new(p.x + nx, p.y + ny, p.z + nz)
}

pub fn electric_fragment(c: Rgb, t: f32, screen: Option<(i32, i32)>, _depth: f32) -> Rgb {
    if let Some((sx, sy)) = screen {
        let (x, y) = (sx as f32, sy as f32);
        let l1 = (t * 12.0 + x * 0.08).sin().abs() * (t * 10.0 + y * 0.06).cos().abs();
        let l2 = (t * 15.0 + x * 0.12 + y * 0.08).sin().abs();
        let l3 = (t * 8.0 + x * 0.05 + y * 0.1).cos().abs();
        let strongest = l1.max(l2).max(l3);

        if strongest > 0.9 {
            return Rgb::new(255, 255, 255);
        } else if strongest > 0.8 {
            return Rgb::new(255, 255, 150);
        } else if strongest > 0.7 {
            return Rgb::new(100, 150, 255);
        } else if strongest > 0.6 {
            return Rgb::new(200, 100, 255);
        }
    }

    let base = (40.0 * (t * 6.0).sin().abs()) as i32;
    brighten(c, base, base, base / 2)
}

// ============================================================================
// Soap bubble: floating wobble, iridescent rings around the screen center
// ============================================================================

pub fn bubble_vertex(p: Vec3, t: f32) -> Vec3 {
    let float_y = 0.1 * (t * 0.8).sin();
    let wave = 0.05 * (t * 3.0 + p.x * 5.0).sin() * (t * 2.0 + p.z * 4.0).cos();
    Vec3::new(p.x + wave, p.y + float_y + wave * 0.5, p.z + wave * 0.3)
}

pub fn bubble_fragment(c: Rgb, t: f32, screen: Option<(i32, i32)>, _depth: f32) -> Rgb {
    let Some((sx, sy)) = screen else {
        let shine = (30.0 * (t * 1.5).sin().abs()) as i32;
        return brighten(c, shine, shine, shine);
    };

    // Off-screen centroids can sit near the i32 limits
    let dx = sx as f32 - (WIDTH / 2) as f32;
    let dy = sy as f32 - (HEIGHT / 2) as f32;
    let distance = (dx * dx + dy * dy).sqrt();
    let angle = dy.atan2(dx);
    let band = (t * 2.0 + distance * 0.02 + angle * 3.0).sin();

    if band > 0.5 {
        Rgb::new(255, (150.0 + 50.0 * t.sin()) as i32, (200.0 + 55.0 * (t * 1.5).cos()) as i32)
    } else if band > 0.0 {
        Rgb::new((100.0 + 80.0 * t.cos()) as i32, (180.0 + 60.0 * (t * 1.2).sin()) as i32, 255)
    } else if band > -0.5 {
        Rgb::new((120.0 + 60.0 * (t * 0.8).sin()) as i32, 255, (180.0 + 50.0 * t.cos()) as i32)
    } else {
        Rgb::new(255, 255, (100.0 + 80.0 * (t * 1.8).sin()) as i32)
    }
}

// ============================================================================
// Hologram: glitching geometry, scanlines and transmission loss
// ============================================================================

pub fn hologram_vertex(p: Vec3, t: f32) -> Vec3 {
    const GLITCH: f32 = 0.02;
    let gx = if (t * 8.0).sin() > 0.3 {
        (t * 25.0 + p.y * 40.0).sin() * GLITCH
    } else {
        0.0
    };
    let gy = if (t * 12.0).cos() > 0.4 {
        (t * 30.0 + p.x * 35.0).cos() * GLITCH
    } else {
        0.0
    };
    let scanline = 0.01 * (p.y * 50.0 + t * 15.0).sin();
    Vec3::new(p.x + gx + scanline, p.y + gy, p.z)
}

pub fn hologram_fragment(c: Rgb, t: f32, screen: Option<(i32, i32)>, _depth: f32) -> Rgb {
    let (r, g, b) = (c.r as f32, c.g as f32, c.b as f32);

    let Some((sx, sy)) = screen else {
        let transmission = (t * 2.0).sin().abs() * 0.5 + 0.5;
        return Rgb::new(
            (r * 0.3 * transmission + 80.0) as i32,
            (g * 0.5 * transmission + 120.0) as i32,
            (b * 0.2 * transmission + 180.0).min(255.0) as i32,
        );
    };
    let (x, y) = (sx as f32, sy as f32);

    if (y * 0.5 + t * 10.0).sin() > 0.8 {
        return Rgb::new(
            ((r * 0.3) as i32 + 200).min(255),
            ((g * 0.3) as i32 + 250).min(255),
            255,
        );
    }

    let noise = (x * 0.3 + t * 20.0).sin().abs() * (y * 0.2 + t * 15.0).cos().abs();
    if noise > 0.9 {
        return Rgb::new(0, 255, 255);
    }

    let transmission = (t * 3.0).sin().abs() * 0.7 + 0.3;
    Rgb::new(
        (((r * 0.2 + 100.0) * transmission) as i32).min(255),
        (((g * 0.4 + 150.0) * transmission) as i32).min(255),
        (((b * 0.1 + 200.0) * transmission) as i32).min(255),
    )
}
