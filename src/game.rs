//! The frame loop and its single shutdown path.

use glow::HasContext;

use crate::abs::App;
use crate::config::DisplayConfig;
use crate::frame::{FramePacer, RunState};
use crate::render::triangle::TriangleRenderer;

/// Owns every resource the program creates.
///
/// The renderer is declared first so its GL objects are released while the context is still
/// alive.
pub struct Game {
    renderer: TriangleRenderer,
    app: App,
    pacer: FramePacer,
    state: RunState,
}

impl Game {
    /// Brings up the window, the context, the shader program and the geometry.
    pub fn new(config: &DisplayConfig) -> anyhow::Result<Self> {
        let app = App::new(config)?;
        let renderer = TriangleRenderer::new(&app.gl)?;

        Ok(Self {
            renderer,
            app,
            pacer: FramePacer::new(config.frame_cap),
            state: RunState::default(),
        })
    }

    /// Runs frames until a quit event arrives.
    pub fn run(&mut self) {
        log::info!("Entering the frame loop");
        while self.state.is_running() {
            unsafe {
                self.app
                    .gl
                    .clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
            }
            self.renderer.draw();

            self.pacer.pace();
            self.app.window.gl_swap_window();

            for event in self.app.event_pump.poll_iter() {
                self.state.handle_event(&event);
            }
        }
        log::info!("Quit requested");
    }

    /// Releases the GL objects, then the context, the window and SDL itself.
    pub fn shutdown(self) {
        let Self { renderer, app, .. } = self;
        drop(renderer);
        drop(app);
        log::info!("Shut down");
    }
}
