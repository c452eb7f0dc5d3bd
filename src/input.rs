//! Keyboard handling
//!
//! Keys are polled once per frame into [`Command`]s; applying them to the
//! render state is pure so it can be tested without a window.

use crate::config::TimingConfig;
use crate::pipeline::RenderState;
use crate::shaders::ShaderRegistry;
use macroquad::prelude::*;

/// One user request for the frame loop
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Zero-based shader index (keys 1-9)
    SelectShader(usize),
    ToggleAutoRotate,
    /// -1.0 for left, +1.0 for right
    Nudge(f32),
    ToggleWireframe,
    SwapCompositor,
    Capture,
    Quit,
}

const SHADER_KEYS: [KeyCode; 9] = [
    KeyCode::Key1,
    KeyCode::Key2,
    KeyCode::Key3,
    KeyCode::Key4,
    KeyCode::Key5,
    KeyCode::Key6,
    KeyCode::Key7,
    KeyCode::Key8,
    KeyCode::Key9,
];

/// Collect this frame's key presses, in a fixed order
pub fn poll_commands() -> Vec<Command> {
    let mut commands = Vec::new();

    for (i, key) in SHADER_KEYS.iter().enumerate() {
        if is_key_pressed(*key) {
            commands.push(Command::SelectShader(i));
        }
    }

    if is_key_pressed(KeyCode::Space) {
        commands.push(Command::ToggleAutoRotate);
    }
    if is_key_pressed(KeyCode::Left) {
        commands.push(Command::Nudge(-1.0));
    }
    if is_key_pressed(KeyCode::Right) {
        commands.push(Command::Nudge(1.0));
    }
    if is_key_pressed(KeyCode::W) {
        commands.push(Command::ToggleWireframe);
    }
    if is_key_pressed(KeyCode::Z) {
        commands.push(Command::SwapCompositor);
    }
    if is_key_pressed(KeyCode::P) || is_key_pressed(KeyCode::F12) {
        commands.push(Command::Capture);
    }
    if is_key_pressed(KeyCode::Escape) {
        commands.push(Command::Quit);
    }

    commands
}

/// Apply the state-only part of a command. Commands that touch the surface,
/// the compositor or the process (capture, swap, quit) are left to the caller.
pub fn apply(
    command: Command,
    state: &mut RenderState,
    registry: &ShaderRegistry,
    timing: &TimingConfig,
) {
    match command {
        Command::SelectShader(index) => {
            state.select_shader(index, registry);
        }
        Command::ToggleAutoRotate => {
            state.toggle_auto_rotate();
        }
        Command::Nudge(sign) => state.nudge(sign * timing.nudge_step),
        Command::ToggleWireframe => state.wireframe = !state.wireframe,
        Command::SwapCompositor | Command::Capture | Command::Quit => {}
    }
}
