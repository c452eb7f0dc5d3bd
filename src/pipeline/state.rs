//! Per-process render state
//!
//! Written only by the frame loop while it applies input at the start of a
//! frame, then read by every pipeline stage for the rest of that frame.

use crate::config::TimingConfig;
use crate::shaders::ShaderRegistry;

#[derive(Debug, Clone, PartialEq)]
pub struct RenderState {
    /// Radians about the vertical axis; never wrapped
    pub rotation_angle: f32,
    /// Shader clock, advanced by a fixed step each frame
    pub animation_time: f32,
    /// Always a valid registry index
    pub active_shader: usize,
    pub auto_rotate: bool,
    /// Draw triangle edges over the filled frame
    pub wireframe: bool,
}

impl Default for RenderState {
    fn default() -> Self {
        Self {
            rotation_angle: 0.0,
            animation_time: 0.0,
            active_shader: 0,
            auto_rotate: true,
            wireframe: false,
        }
    }
}

impl RenderState {
    /// Advance the clock one frame, spinning the model when auto-rotate is on
    pub fn advance(&mut self, timing: &TimingConfig) {
        self.animation_time += timing.time_step;
        if self.auto_rotate {
            self.rotation_angle += timing.auto_rotate_step;
        }
    }

    /// Select a shader by index, clamped to the registry. Returns the index used.
    pub fn select_shader(&mut self, index: usize, registry: &ShaderRegistry) -> usize {
        self.active_shader = registry.select(index);
        self.active_shader
    }

    pub fn toggle_auto_rotate(&mut self) -> bool {
        self.auto_rotate = !self.auto_rotate;
        self.auto_rotate
    }

    pub fn nudge(&mut self, radians: f32) {
        self.rotation_angle += radians;
    }
}
