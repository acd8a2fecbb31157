//! Cross-fade page transition animator.
//!
//! Two logical states (`Idle`, transitioning) driven entirely by injected
//! time: fade the page opacity from 1.0 down to 0.3 over 400 ms, commit the
//! new page index in a single jump, fade back up to 1.0 over 400 ms. While a
//! transition is in flight, further requests are dropped rather than queued,
//! so concurrent drivers (gesture vs. playback sync) resolve to at most one
//! index mutation per cycle.

use std::time::{Duration, Instant};
use tracing::debug;

pub const FADE_DURATION: Duration = Duration::from_millis(400);
pub const FADE_DIP_OPACITY: f32 = 0.3;
pub const FULL_OPACITY: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    FadingOut { target: usize },
    FadingIn,
}

#[derive(Debug)]
pub struct Transition {
    phase: Phase,
    deadline: Option<Instant>,
}

impl Default for Transition {
    fn default() -> Self {
        Self::new()
    }
}

impl Transition {
    pub fn new() -> Self {
        Transition {
            phase: Phase::Idle,
            deadline: None,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.phase == Phase::Idle
    }

    /// Opacity the renderer should be interpolating toward.
    pub fn opacity_target(&self) -> f32 {
        match self.phase {
            Phase::FadingOut { .. } => FADE_DIP_OPACITY,
            Phase::Idle | Phase::FadingIn => FULL_OPACITY,
        }
    }

    /// Begin a transition to `target`. Returns false (and does nothing) if a
    /// transition is already in flight.
    pub fn request(&mut self, target: usize, now: Instant) -> bool {
        if !self.is_idle() {
            debug!(target, "Dropped page transition request while transitioning");
            return false;
        }
        self.phase = Phase::FadingOut { target };
        self.deadline = Some(now + FADE_DURATION);
        true
    }

    /// Advance the animation. Returns the target index exactly once, at the
    /// instant the fade-out completes; the caller commits it to the pager.
    pub fn tick(&mut self, now: Instant) -> Option<usize> {
        let deadline = self.deadline?;
        if now < deadline {
            return None;
        }
        match self.phase {
            Phase::FadingOut { target } => {
                // Anchor the fade-in to the fade-out deadline so back-to-back
                // phases do not drift with the caller's tick cadence.
                self.phase = Phase::FadingIn;
                self.deadline = Some(deadline + FADE_DURATION);
                Some(target)
            }
            Phase::FadingIn => {
                self.phase = Phase::Idle;
                self.deadline = None;
                None
            }
            Phase::Idle => None,
        }
    }

    pub fn cancel(&mut self) {
        self.phase = Phase::Idle;
        self.deadline = None;
    }
}
