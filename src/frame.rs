//! Frame loop state: whether to keep going, and how long to wait between frames.

use std::time::{Duration, Instant};

use sdl2::event::Event;

/// Whether the frame loop should keep going. `Stopped` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Running,
    Stopped,
}

impl RunState {
    /// Reacts to one event. Only a quit request does anything.
    pub fn handle_event(&mut self, event: &Event) {
        if let Event::Quit { .. } = event {
            *self = RunState::Stopped;
        }
    }

    pub fn is_running(self) -> bool {
        self == RunState::Running
    }
}

/// Caps the frame rate at a target frame duration.
///
/// With no target, frames go out as fast as vsync lets them.
pub struct FramePacer {
    target: Option<Duration>,
    last_frame: Instant,
}

impl FramePacer {
    pub fn new(target: Option<Duration>) -> Self {
        Self {
            target,
            last_frame: Instant::now(),
        }
    }

    /// How long to sleep when `elapsed` has passed since the previous frame.
    pub fn sleep_duration(&self, elapsed: Duration) -> Duration {
        self.target
            .map_or(Duration::ZERO, |target| target.saturating_sub(elapsed))
    }

    /// Sleeps out the rest of the frame and starts timing the next one.
    pub fn pace(&mut self) {
        let wait = self.sleep_duration(self.last_frame.elapsed());
        if !wait.is_zero() {
            std::thread::sleep(wait);
        }
        self.last_frame = Instant::now();
    }
}

#[cfg(test)]
mod tests {
    use sdl2::event::WindowEvent;

    use super::*;
    use crate::config::TARGET_FRAME_TIME;

    #[test]
    fn test_sleep_duration() {
        let pacer = FramePacer::new(Some(TARGET_FRAME_TIME));
        assert_eq!(pacer.sleep_duration(Duration::ZERO), TARGET_FRAME_TIME);
        assert_eq!(
            pacer.sleep_duration(Duration::from_millis(10)),
            TARGET_FRAME_TIME - Duration::from_millis(10)
        );
        assert_eq!(pacer.sleep_duration(TARGET_FRAME_TIME), Duration::ZERO);
        assert_eq!(pacer.sleep_duration(Duration::from_millis(40)), Duration::ZERO);
    }

    #[test]
    fn test_target_is_sixty_hertz() {
        let millis = TARGET_FRAME_TIME.as_secs_f64() * 1000.0;
        assert!((millis - 16.7).abs() < 0.05);
    }

    #[test]
    fn test_uncapped_never_sleeps() {
        let pacer = FramePacer::new(None);
        assert_eq!(pacer.sleep_duration(Duration::ZERO), Duration::ZERO);
    }

    #[test]
    fn test_pace_waits_out_the_frame() {
        let target = Duration::from_millis(5);
        let mut pacer = FramePacer::new(Some(target));
        let start = Instant::now();
        pacer.pace();
        assert!(start.elapsed() >= target - Duration::from_millis(1));
    }

    #[test]
    fn test_run_state_stops_on_quit_only() {
        let mut state = RunState::default();
        assert!(state.is_running());

        state.handle_event(&Event::Window {
            timestamp: 0,
            window_id: 1,
            win_event: WindowEvent::Shown,
        });
        state.handle_event(&Event::AppTerminating { timestamp: 0 });
        assert!(state.is_running());

        state.handle_event(&Event::Quit { timestamp: 0 });
        assert_eq!(state, RunState::Stopped);

        // Nothing brings it back.
        state.handle_event(&Event::Window {
            timestamp: 1,
            window_id: 1,
            win_event: WindowEvent::Exposed,
        });
        state.handle_event(&Event::Quit { timestamp: 1 });
        assert_eq!(state, RunState::Stopped);
    }
}
