//! Shadebox: software-rendered shader playground
//!
//! Loads an OBJ mesh and spins it under a set of switchable vertex/fragment
//! shader pairs, all rasterized on the CPU:
//! - Flat-shaded triangles with a depth-dimmed palette
//! - Painter's algorithm or z-buffer compositing
//! - Live shader switching, wireframe overlay and PNG captures

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod app;
mod capture;
mod config;
mod error;
mod input;
mod mesh;
mod pipeline;
mod rasterizer;
mod shaders;

use app::App;
use config::{load_config, DEFAULT_CONFIG_PATH};
use input::poll_commands;
use macroquad::prelude::*;
use rasterizer::{HEIGHT, WIDTH};

fn window_conf() -> Conf {
    Conf {
        window_title: format!("Shadebox v{}", VERSION),
        window_width: WIDTH as i32,
        window_height: HEIGHT as i32,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

const HUD_COLOR: macroquad::color::Color = macroquad::color::Color::new(0.9, 0.9, 0.9, 1.0);

#[macroquad::main(window_conf)]
async fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config_path = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    let mut app = match load_config(&config_path).and_then(App::load) {
        Ok(app) => app,
        Err(e) => {
            log::error!("Failed to start: {}", e);
            std::process::exit(1);
        }
    };
    for (i, binding) in app.registry.iter().enumerate() {
        log::debug!("Shader {}/{}: {}", i + 1, app.registry.len(), binding.name);
    }
    log::info!("Shader: {}", app.active_shader().name);

    let frame_budget = 1.0 / app.config.timing.target_fps.max(1) as f64;

    'frames: loop {
        let frame_start = get_time();

        for command in poll_commands() {
            if !app.handle(command) {
                break 'frames;
            }
        }

        app.advance();
        app.render_frame();

        clear_background(BLACK);
        let texture =
            Texture2D::from_rgba8(app.fb.width as u16, app.fb.height as u16, &app.fb.pixels);
        texture.set_filter(FilterMode::Nearest);
        draw_texture_ex(
            &texture,
            0.0,
            0.0,
            WHITE,
            DrawTextureParams {
                dest_size: Some(Vec2::new(screen_width(), screen_height())),
                ..Default::default()
            },
        );

        draw_text(app.active_shader().name, 12.0, 28.0, 24.0, HUD_COLOR);
        draw_text(
            &format!("{} | frame {}", app.compositor_label(), app.frame),
            12.0,
            50.0,
            16.0,
            HUD_COLOR,
        );

        // next_frame follows vsync; sleep off whatever is left of the budget
        #[cfg(not(target_arch = "wasm32"))]
        {
            let elapsed = get_time() - frame_start;
            if elapsed < frame_budget {
                std::thread::sleep(std::time::Duration::from_secs_f64(frame_budget - elapsed));
            }
        }
        #[cfg(target_arch = "wasm32")]
        let _ = (frame_start, frame_budget);

        next_frame().await;
    }
}
