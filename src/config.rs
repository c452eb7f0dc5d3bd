//! Render configuration
//!
//! Uses RON (Rusty Object Notation) for a human-editable settings file.
//! Every field has a default, so a partial file only overrides what it names.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use crate::error::LoadError;
use crate::rasterizer::{Color, HEIGHT, WIDTH};

/// Default config file, looked up in the working directory
pub const DEFAULT_CONFIG_PATH: &str = "shadebox.ron";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub surface: SurfaceConfig,
    pub camera: CameraConfig,
    pub shading: ShadingConfig,
    pub timing: TimingConfig,
    pub assets: AssetConfig,
    pub compositor: CompositorKind,
    pub capture_dir: PathBuf,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            surface: SurfaceConfig::default(),
            camera: CameraConfig::default(),
            shading: ShadingConfig::default(),
            timing: TimingConfig::default(),
            assets: AssetConfig::default(),
            compositor: CompositorKind::Painter,
            capture_dir: PathBuf::from("captures"),
        }
    }
}

/// Target surface size and background
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    pub width: usize,
    pub height: usize,
    pub clear_color: Color,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            clear_color: Color::new(10, 10, 15),
        }
    }
}

/// Model normalization and perspective constants
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Size of the largest mesh extent after normalization
    pub target_size: f32,
    /// Camera distance `D` added to camera-space Z before the divide
    pub distance: f32,
    /// Focal scale `F`
    pub focal: f32,
    /// Horizontal slack outside the surface before a triangle is dropped
    pub cull_margin: i32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            target_size: 200.0,
            distance: 400.0,
            focal: 300.0,
            cull_margin: 100,
        }
    }
}

/// Per-triangle color resolution and depth dimming
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadingConfig {
    /// Base color for triangles missing a UV
    pub fallback_color: Color,
    /// Depth factor is `max(bias - depth * scale, floor)`
    pub depth_bias: f32,
    pub depth_scale: f32,
    pub depth_floor: f32,
    /// Draw a 1px darkened contour around each filled triangle
    pub outline: bool,
    /// Per-material adjustments applied to each texture sample
    pub material_tints: HashMap<String, MaterialTint>,
}

impl Default for ShadingConfig {
    fn default() -> Self {
        Self {
            fallback_color: Color::new(255, 220, 0),
            depth_bias: 1.2,
            depth_scale: 0.002,
            depth_floor: 0.4,
            outline: false,
            material_tints: HashMap::new(),
        }
    }
}

/// Color decoration for a named material
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MaterialTint {
    /// Replace the sample outright
    Solid(Color),
    /// Multiply each channel
    Scale((f32, f32, f32)),
}

impl MaterialTint {
    pub fn apply(&self, sample: Color) -> Color {
        match *self {
            MaterialTint::Solid(c) => c,
            MaterialTint::Scale((r, g, b)) => Color::new(
                (sample.r as f32 * r).clamp(0.0, 255.0) as u8,
                (sample.g as f32 * g).clamp(0.0, 255.0) as u8,
                (sample.b as f32 * b).clamp(0.0, 255.0) as u8,
            ),
        }
    }
}

/// Per-frame animation steps and pacing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub time_step: f32,
    pub auto_rotate_step: f32,
    pub nudge_step: f32,
    pub target_fps: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            time_step: 0.05,
            auto_rotate_step: 0.02,
            nudge_step: 0.1,
            target_fps: 60,
        }
    }
}

/// Mesh and texture locations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    pub mesh: PathBuf,
    /// Overrides the texture named by the mesh materials
    pub texture: Option<PathBuf>,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            mesh: PathBuf::from("assets/model.obj"),
            texture: None,
        }
    }
}

/// Triangle compositing strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CompositorKind {
    /// Back-to-front per-triangle sort
    #[default]
    Painter,
    /// Per-pixel depth test
    ZBuffer,
}

impl CompositorKind {
    pub fn toggled(self) -> Self {
        match self {
            CompositorKind::Painter => CompositorKind::ZBuffer,
            CompositorKind::ZBuffer => CompositorKind::Painter,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CompositorKind::Painter => "painter",
            CompositorKind::ZBuffer => "z-buffer",
        }
    }
}

/// Load a config from a RON file. A missing file yields the defaults;
/// a file that exists but does not parse is an error.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<RenderConfig, LoadError> {
    let path = path.as_ref();
    let contents = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::info!("No config at {}, using defaults", path.display());
            return Ok(RenderConfig::default());
        }
        Err(source) => {
            return Err(LoadError::Io { path: path.to_path_buf(), source });
        }
    };
    load_config_from_str(&contents)
}

/// Parse a config from a RON string
pub fn load_config_from_str(s: &str) -> Result<RenderConfig, LoadError> {
    Ok(ron::from_str(s)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_default() {
        let config = load_config_from_str("()").unwrap();
        assert_eq!(config.surface.width, 800);
        assert_eq!(config.camera.target_size, 200.0);
        assert_eq!(config.camera.distance, 400.0);
        assert_eq!(config.camera.focal, 300.0);
        assert_eq!(config.timing.target_fps, 60);
        assert_eq!(config.compositor, CompositorKind::Painter);
    }

    #[test]
    fn test_partial_override() {
        let src = r#"(
            camera: (focal: 250.0),
            shading: (
                outline: true,
                material_tints: {
                    "eye": Scale((0.2, 0.2, 0.2)),
                    "mouth": Solid((r: 200, g: 40, b: 40)),
                },
            ),
            compositor: ZBuffer,
        )"#;
        let config = load_config_from_str(src).unwrap();
        assert_eq!(config.camera.focal, 250.0);
        assert_eq!(config.camera.distance, 400.0);
        assert!(config.shading.outline);
        assert_eq!(config.compositor, CompositorKind::ZBuffer);
        assert_eq!(
            config.shading.material_tints.get("mouth"),
            Some(&MaterialTint::Solid(Color::new(200, 40, 40)))
        );
    }

    #[test]
    fn test_bundled_config_parses() {
        let config = load_config_from_str(include_str!("../shadebox.ron")).unwrap();
        assert_eq!(config.assets.mesh, PathBuf::from("assets/model.obj"));
        assert!(config.shading.material_tints.contains_key("lid"));
    }

    #[test]
    fn test_malformed_config_is_error() {
        assert!(matches!(load_config_from_str("(camera: 3"), Err(LoadError::Config(_))));
    }

    #[test]
    fn test_missing_file_is_default() {
        let config = load_config("definitely/not/here.ron").unwrap();
        assert_eq!(config.shading.fallback_color, Color::new(255, 220, 0));
    }

    #[test]
    fn test_tint_apply() {
        let c = Color::new(100, 200, 50);
        assert_eq!(MaterialTint::Scale((0.5, 2.0, 0.0)).apply(c), Color::new(50, 255, 0));
        assert_eq!(MaterialTint::Solid(Color::BLACK).apply(c), Color::BLACK);
    }

    #[test]
    fn test_compositor_toggle() {
        assert_eq!(CompositorKind::Painter.toggled(), CompositorKind::ZBuffer);
        assert_eq!(CompositorKind::ZBuffer.toggled().label(), "painter");
    }
}
