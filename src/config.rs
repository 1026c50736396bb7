//! Display configuration.
//!
//! Everything here is fixed at compile time. [`DISPLAY`] is what the binary runs with.

use std::time::Duration;

/// Window and context settings requested at startup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayConfig {
    pub title: &'static str,
    /// Desktop fullscreen. `width` and `height` are ignored when set.
    pub fullscreen: bool,
    pub width: u32,
    pub height: u32,
    /// Requested OpenGL core profile version as `(major, minor)`.
    pub gl_version: (u8, u8),
    pub depth_bits: u8,
    pub double_buffer: bool,
    pub vsync: bool,
    pub clear_color: [f32; 4],
    /// Upper bound on frame rate, applied on top of vsync. `None` leaves pacing to vsync.
    pub frame_cap: Option<Duration>,
}

/// One frame at 60 Hz.
pub const TARGET_FRAME_TIME: Duration = Duration::from_nanos(16_666_667);

pub const DISPLAY: DisplayConfig = DisplayConfig {
    title: "OpenGL 4.6",
    fullscreen: true,
    width: 960,
    height: 540,
    gl_version: (4, 6),
    depth_bits: 24,
    double_buffer: true,
    vsync: true,
    clear_color: [0.0, 0.5, 1.0, 0.0],
    frame_cap: Some(TARGET_FRAME_TIME),
};

impl DisplayConfig {
    /// Resolves the window size, given the size of the current desktop display mode.
    pub fn window_size(&self, desktop: (u32, u32)) -> (u32, u32) {
        if self.fullscreen {
            desktop
        } else {
            (self.width, self.height)
        }
    }

    /// Checks the settings before anything is handed to SDL.
    pub fn validate(&self) -> Result<(), String> {
        if !self.fullscreen && (self.width == 0 || self.height == 0) {
            return Err(format!(
                "Invalid window size {}x{}",
                self.width, self.height
            ));
        }
        if self.gl_version.0 < 3 {
            return Err(format!(
                "OpenGL {}.{} has no core profile",
                self.gl_version.0, self.gl_version.1
            ));
        }
        Ok(())
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DISPLAY
    }
}
