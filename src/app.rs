//! Application state
//!
//! Owns everything a frame needs. `render_frame` draws one frame into the
//! software surface and has no windowing dependency; presenting the surface
//! is left to the host loop in `main.rs`.

use crate::capture::{capture_path, save_surface};
use crate::config::RenderConfig;
use crate::error::LoadError;
use crate::input::{self, Command};
use crate::mesh::{load_obj, resolve_texture_path, Mesh};
use crate::pipeline::{
    make_compositor, CompositeStats, Compositor, GeometryStage, GeometryStats, RenderState,
    ShadeContext,
};
use crate::rasterizer::{Color, Framebuffer, Texture};
use crate::shaders::{ShaderBinding, ShaderRegistry};

/// Size of the solid grid used when no texture image is available
const FALLBACK_TEXTURE_SIZE: usize = 16;

/// Per-frame counters, logged at trace level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub geometry: GeometryStats,
    pub composite: CompositeStats,
}

pub struct App {
    pub config: RenderConfig,
    pub mesh: Mesh,
    pub texture: Texture,
    pub registry: ShaderRegistry,
    pub state: RenderState,
    pub fb: Framebuffer,
    geometry: GeometryStage,
    compositor: Box<dyn Compositor>,
    /// Frames rendered so far
    pub frame: u64,
}

impl App {
    /// Load the mesh and texture named by `config`
    pub fn load(config: RenderConfig) -> Result<Self, LoadError> {
        let mesh = load_obj(&config.assets.mesh)?;
        let texture = load_texture(&mesh, &config)?;
        Self::new(mesh, texture, config)
    }

    pub fn new(mesh: Mesh, texture: Texture, config: RenderConfig) -> Result<Self, LoadError> {
        let geometry = GeometryStage::new(&mesh, &config)
            .ok_or_else(|| LoadError::EmptyMesh(config.assets.mesh.clone()))?;
        let fb = Framebuffer::new(config.surface.width, config.surface.height);
        let compositor = make_compositor(config.compositor);

        Ok(Self {
            mesh,
            texture,
            registry: ShaderRegistry::builtin(),
            state: RenderState::default(),
            fb,
            geometry,
            compositor,
            config,
            frame: 0,
        })
    }

    pub fn active_shader(&self) -> &ShaderBinding {
        self.registry.get(self.state.active_shader)
    }

    pub fn compositor_label(&self) -> &'static str {
        self.compositor.kind().label()
    }

    /// Advance animation time and rotation by one frame
    pub fn advance(&mut self) {
        self.state.advance(&self.config.timing);
    }

    /// Draw one frame into `self.fb`
    pub fn render_frame(&mut self) -> FrameStats {
        self.fb.clear(self.config.surface.clear_color);

        let shader = self.registry.get(self.state.active_shader);
        let (mut triangles, geometry) = self.geometry.build(&self.mesh, &self.state, shader);

        let ctx = ShadeContext {
            texture: &self.texture,
            shader,
            time: self.state.animation_time,
            shading: &self.config.shading,
        };
        let composite = self.compositor.composite(&mut self.fb, &mut triangles, &ctx);

        if self.state.wireframe {
            for tri in &triangles {
                self.fb.draw_triangle_wireframe(tri.points, Color::WHITE);
            }
        }

        self.frame += 1;
        log::trace!(
            "Frame {}: {} emitted, {} clipped, {} malformed, {} drawn, {} skipped",
            self.frame,
            geometry.emitted,
            geometry.clipped,
            geometry.malformed,
            composite.drawn,
            composite.skipped
        );
        FrameStats { geometry, composite }
    }

    /// Apply a command. Returns false when the app should quit.
    pub fn handle(&mut self, command: Command) -> bool {
        match command {
            Command::Quit => return false,
            Command::SwapCompositor => {
                self.compositor = make_compositor(self.compositor.kind().toggled());
                log::info!("Compositor: {}", self.compositor_label());
            }
            Command::Capture => self.capture(),
            _ => {
                input::apply(command, &mut self.state, &self.registry, &self.config.timing);
                match command {
                    Command::SelectShader(_) => {
                        log::info!("Shader: {}", self.active_shader().name);
                    }
                    Command::ToggleAutoRotate => {
                        log::info!("Auto-rotate: {}", self.state.auto_rotate);
                    }
                    Command::ToggleWireframe => {
                        log::debug!("Wireframe: {}", self.state.wireframe);
                    }
                    _ => {}
                }
            }
        }
        true
    }

    /// Save the current surface. Failures are logged, never fatal.
    fn capture(&self) {
        let path = capture_path(&self.config.capture_dir, self.frame);
        match save_surface(&self.fb, &path) {
            Ok(()) => log::info!("Saved {}", path.display()),
            Err(e) => log::warn!("Capture to {} failed: {}", path.display(), e),
        }
    }
}

/// Texture named by the config or the mesh materials. A missing file falls
/// back to a solid grid; a file that exists but fails to decode is an error.
fn load_texture(mesh: &Mesh, config: &RenderConfig) -> Result<Texture, LoadError> {
    let fallback = || {
        Texture::solid(FALLBACK_TEXTURE_SIZE, FALLBACK_TEXTURE_SIZE, config.shading.fallback_color)
    };

    let Some(path) = resolve_texture_path(mesh, config.assets.texture.as_deref()) else {
        log::warn!("Mesh names no texture, using fallback color");
        return Ok(fallback());
    };

    match Texture::from_file(&path) {
        Ok(texture) => {
            log::info!(
                "Loaded texture '{}' from {}: {}x{}",
                texture.name,
                path.display(),
                texture.width,
                texture.height
            );
            Ok(texture)
        }
        Err(image::ImageError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            log::warn!("Texture {} not found, using fallback color", path.display());
            Ok(fallback())
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CompositorKind;
    use crate::mesh::{Face, FaceCorner};
    use crate::rasterizer::{Rgb, Vec3};

    /// One triangle facing the camera at the origin
    fn triangle_mesh() -> Mesh {
        Mesh {
            vertices: vec![
                Vec3::new(-1.0, -1.0, 0.0),
                Vec3::new(1.0, -1.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
            ],
            faces: vec![Face::new(vec![
                FaceCorner::new(0, None),
                FaceCorner::new(2, None),
                FaceCorner::new(1, None),
            ])],
            ..Default::default()
        }
    }

    fn app() -> App {
        let texture = Texture::solid(1, 1, Color::WHITE);
        App::new(triangle_mesh(), texture, RenderConfig::default()).unwrap()
    }

    #[test]
    fn test_single_triangle_frame() {
        let mut app = app();
        let stats = app.render_frame();
        assert_eq!(stats.geometry.emitted, 1);
        assert_eq!(stats.composite.drawn, 1);

        let fallback = app.config.shading.fallback_color;
        let expected = app
            .active_shader()
            .shade(Rgb::from(fallback), 0.0, Some((400, 425)), 0.0)
            .scaled(1.2);
        assert_eq!(app.fb.get_pixel(400, 425), Some(expected));
        assert_eq!(expected, Color::new(255, 255, 0));

        // Background untouched
        assert_eq!(app.fb.get_pixel(5, 5), Some(app.config.surface.clear_color));
    }

    #[test]
    fn test_both_compositors_agree_on_single_triangle() {
        let mut app = app();
        app.render_frame();
        let painter = app.fb.pixels.clone();

        assert!(app.handle(Command::SwapCompositor));
        assert_eq!(app.compositor_label(), CompositorKind::ZBuffer.label());
        app.render_frame();
        assert_eq!(app.fb.pixels, painter);
    }

    #[test]
    fn test_wireframe_overlay() {
        let mut app = app();
        app.handle(Command::ToggleWireframe);
        app.render_frame();
        assert_eq!(app.fb.get_pixel(400, 325), Some(Color::WHITE));
        assert_ne!(app.fb.get_pixel(400, 425), Some(Color::WHITE));
    }

    #[test]
    fn test_quit_and_shader_selection() {
        let mut app = app();
        assert!(app.handle(Command::SelectShader(2)));
        assert_eq!(app.active_shader().name, app.registry.get(2).name);
        assert!(!app.handle(Command::Quit));
    }

    #[test]
    fn test_back_side_is_empty_after_half_turn() {
        let mut app = app();
        app.state.rotation_angle = std::f32::consts::PI;
        let stats = app.render_frame();
        assert_eq!(stats.geometry.emitted, 0);
        assert_eq!(stats.geometry.clipped, 1);
        assert_eq!(app.fb.get_pixel(400, 425), Some(app.config.surface.clear_color));
    }

    #[test]
    fn test_bundled_cube_renders() {
        let mut config = RenderConfig::default();
        config.assets.mesh = concat!(env!("CARGO_MANIFEST_DIR"), "/assets/model.obj").into();
        let mut app = App::load(config).unwrap();
        let stats = app.render_frame();
        // Only the face toward the camera survives culling at angle 0
        assert_eq!(stats.geometry.emitted, 2);
        assert_eq!(stats.composite.drawn, 2);
        assert_ne!(app.fb.get_pixel(400, 400), Some(app.config.surface.clear_color));
    }

    #[test]
    fn test_empty_mesh_is_rejected() {
        let texture = Texture::solid(1, 1, Color::WHITE);
        let res = App::new(Mesh::default(), texture, RenderConfig::default());
        assert!(matches!(res, Err(LoadError::EmptyMesh(_))));
    }

    #[test]
    fn test_missing_texture_falls_back() {
        let mut config = RenderConfig::default();
        config.assets.texture = Some("does/not/exist.png".into());
        let texture = load_texture(&triangle_mesh(), &config).unwrap();
        assert_eq!(texture.sample(0.5, 0.5), config.shading.fallback_color);
    }
}
