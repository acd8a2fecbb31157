//! Auto-hiding header chrome.
//!
//! The header starts visible, dims after two seconds of inactivity, and any
//! touch brings it back and re-arms the idle delay. Only one dim deadline is
//! ever armed; a new interaction replaces it rather than queueing another.

use std::time::{Duration, Instant};
use tracing::debug;

pub const VISIBLE_OPACITY: f32 = 0.9;
pub const DIMMED_OPACITY: f32 = 0.2;
pub const IDLE_DELAY: Duration = Duration::from_millis(2000);
pub const DIM_FADE: Duration = Duration::from_millis(800);
pub const SHOW_FADE: Duration = Duration::from_millis(300);

#[derive(Debug)]
pub struct Chrome {
    opacity_target: f32,
    fade_duration: Duration,
    dim_deadline: Option<Instant>,
}

impl Chrome {
    /// Fully visible, with the initial idle delay already armed.
    pub fn new(now: Instant) -> Self {
        Chrome {
            opacity_target: VISIBLE_OPACITY,
            fade_duration: SHOW_FADE,
            dim_deadline: Some(now + IDLE_DELAY),
        }
    }

    pub fn opacity_target(&self) -> f32 {
        self.opacity_target
    }

    /// Duration of the fade toward the current target, for the renderer.
    pub fn fade_duration(&self) -> Duration {
        self.fade_duration
    }

    pub fn dim_pending(&self) -> bool {
        self.dim_deadline.is_some()
    }

    /// A touch on the header: cancel any pending dim, show immediately, and
    /// re-arm the idle delay from `now`.
    pub fn interaction(&mut self, now: Instant) {
        self.opacity_target = VISIBLE_OPACITY;
        self.fade_duration = SHOW_FADE;
        self.dim_deadline = Some(now + IDLE_DELAY);
    }

    pub fn tick(&mut self, now: Instant) {
        if self.dim_deadline.is_some_and(|deadline| now >= deadline) {
            self.opacity_target = DIMMED_OPACITY;
            self.fade_duration = DIM_FADE;
            self.dim_deadline = None;
            debug!("Header chrome dimmed after idle delay");
        }
    }

    pub fn cancel(&mut self) {
        self.dim_deadline = None;
    }
}
