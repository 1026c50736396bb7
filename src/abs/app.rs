//! SDL2 and OpenGL application management.
//!
//! This module defines the [`App`] struct which owns the SDL2 subsystems, the window and the
//! OpenGL context, and resolves the OpenGL entry points against that context.

use std::sync::Arc;

use anyhow::{Context, anyhow};
use glow::HasContext;
use sdl2::video::{GLProfile, SwapInterval};

use crate::config::DisplayConfig;

/// The [`App`] struct encapsulates the SDL2 and OpenGL context.
///
/// Fields drop in declaration order, so the GL function table and context go before the window,
/// and the window before the SDL subsystems.
pub struct App {
    pub gl: Arc<glow::Context>,
    pub gl_context: sdl2::video::GLContext,
    pub event_pump: sdl2::EventPump,
    pub window: sdl2::video::Window,
    pub video_subsystem: sdl2::VideoSubsystem,
    pub sdl: sdl2::Sdl,
}

impl App {
    /// Opens a window with a current OpenGL context as described by `config`.
    ///
    /// Any failure here is fatal to the caller; nothing is retried.
    pub fn new(config: &DisplayConfig) -> anyhow::Result<Self> {
        Self::with_window(config, |builder| builder)
    }

    /// Same as [`App::new`], but lets the caller adjust the window before it is built.
    pub fn with_window<F>(config: &DisplayConfig, customize: F) -> anyhow::Result<Self>
    where
        F: FnOnce(&mut sdl2::video::WindowBuilder) -> &mut sdl2::video::WindowBuilder,
    {
        config.validate().map_err(|e| anyhow!(e))?;

        let sdl = sdl2::init()
            .map_err(|e| anyhow!(e))
            .context("Failed to initialize SDL")?;
        let video_subsystem = sdl
            .video()
            .map_err(|e| anyhow!(e))
            .context("Failed to initialize SDL video")?;
        video_subsystem
            .gl_load_library_default()
            .map_err(|e| anyhow!(e))
            .context("Failed to load the OpenGL library")?;

        let gl_attr = video_subsystem.gl_attr();
        gl_attr.set_accelerated_visual(true);
        gl_attr.set_context_profile(GLProfile::Core);
        gl_attr.set_context_version(config.gl_version.0, config.gl_version.1);
        gl_attr.set_double_buffer(config.double_buffer);
        gl_attr.set_depth_size(config.depth_bits);

        let desktop = if config.fullscreen {
            let display_mode = video_subsystem
                .current_display_mode(0)
                .map_err(|e| anyhow!(e))
                .context("Failed to query the display mode")?;
            (display_mode.w as u32, display_mode.h as u32)
        } else {
            (config.width, config.height)
        };
        let (width, height) = config.window_size(desktop);

        let mut builder = video_subsystem.window(config.title, width, height);
        builder.opengl().position_centered();
        if config.fullscreen {
            builder.fullscreen_desktop();
        }
        let window = customize(&mut builder)
            .build()
            .context("Failed to open window")?;

        let gl_context = window
            .gl_create_context()
            .map_err(|e| anyhow!(e))
            .context("Failed to create OpenGL context")?;
        window
            .gl_make_current(&gl_context)
            .map_err(|e| anyhow!(e))
            .context("Failed to make the OpenGL context current")?;

        let gl = load_functions(&video_subsystem, config.gl_version)
            .context("Failed to load OpenGL functions")?;
        log::info!("OpenGL loaded");
        unsafe {
            log::info!("Vendor: {}", gl.get_parameter_string(glow::VENDOR));
            log::info!("Renderer: {}", gl.get_parameter_string(glow::RENDERER));
            log::info!("Version: {}", gl.get_parameter_string(glow::VERSION));
        }

        if config.vsync
            && let Err(e) = video_subsystem.gl_set_swap_interval(SwapInterval::VSync)
        {
            log::warn!("Vsync unavailable, relying on the frame cap: {e}");
        }

        let (drawable_width, drawable_height) = window.drawable_size();
        let [r, g, b, a] = config.clear_color;
        unsafe {
            gl.disable(glow::DEPTH_TEST);
            gl.disable(glow::CULL_FACE);
            gl.viewport(0, 0, drawable_width as i32, drawable_height as i32);
            gl.clear_color(r, g, b, a);
        }

        let event_pump = sdl
            .event_pump()
            .map_err(|e| anyhow!(e))
            .context("Failed to create the event pump")?;

        Ok(Self {
            gl: Arc::new(gl),
            gl_context,
            event_pump,
            window,
            video_subsystem,
            sdl,
        })
    }
}

/// Resolves the OpenGL entry points against the current context.
///
/// Fails when the driver does not export `glGetString` or when the context it gave us is older
/// than `requested`.
fn load_functions(
    video_subsystem: &sdl2::VideoSubsystem,
    requested: (u8, u8),
) -> anyhow::Result<glow::Context> {
    if video_subsystem.gl_get_proc_address("glGetString").is_null() {
        return Err(anyhow!("glGetString could not be resolved"));
    }

    let gl = unsafe {
        glow::Context::from_loader_function(|s| {
            video_subsystem.gl_get_proc_address(s) as *const _
        })
    };

    let version = gl.version();
    if !version_satisfies((version.major as u32, version.minor as u32), requested) {
        return Err(anyhow!(
            "context reports OpenGL {}.{}, {}.{} was requested",
            version.major,
            version.minor,
            requested.0,
            requested.1
        ));
    }

    Ok(gl)
}

fn version_satisfies(actual: (u32, u32), requested: (u8, u8)) -> bool {
    actual >= (requested.0 as u32, requested.1 as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_satisfies() {
        assert!(version_satisfies((4, 6), (4, 6)));
        assert!(version_satisfies((4, 6), (3, 3)));
        assert!(!version_satisfies((4, 5), (4, 6)));
        assert!(!version_satisfies((3, 3), (4, 6)));
    }
}
