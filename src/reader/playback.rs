//! Simulated audio playback clock.
//!
//! There is no real audio backend; listen mode runs a one-second-granularity
//! clock against a fixed 90-second duration. The clock owns only its own
//! ticker deadline; page syncing is the session's job, driven off the
//! position exposed here.

use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Fixed total duration in the absence of a real audio backend.
pub const SIMULATED_DURATION_SECS: u32 = 90;
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);
pub const SEEK_STEP_SECS: i64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Stopped,
    Playing,
    Finished,
}

#[derive(Debug)]
pub struct PlaybackClock {
    state: PlaybackState,
    position_secs: u32,
    duration_secs: u32,
    next_tick: Option<Instant>,
}

impl Default for PlaybackClock {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaybackClock {
    pub fn new() -> Self {
        PlaybackClock {
            state: PlaybackState::Stopped,
            position_secs: 0,
            duration_secs: 0,
            next_tick: None,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn position_secs(&self) -> u32 {
        self.position_secs
    }

    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }

    /// Begin simulated playback. Idempotent while playing: a second call
    /// never arms a second ticker. Finished playback stays finished.
    pub fn start(&mut self, now: Instant) {
        match self.state {
            PlaybackState::Playing => {
                debug!("Playback already running; start ignored");
            }
            PlaybackState::Finished => {
                debug!("Playback already finished; start ignored");
            }
            PlaybackState::Stopped => {
                self.state = PlaybackState::Playing;
                self.duration_secs = SIMULATED_DURATION_SECS;
                self.next_tick = Some(now + TICK_INTERVAL);
                info!(duration_secs = self.duration_secs, "Simulated playback started");
            }
        }
    }

    /// Advance the clock through every elapsed one-second boundary. Reaching
    /// the duration clamps the position, disarms the ticker, and finishes.
    pub fn tick(&mut self, now: Instant) {
        while let Some(deadline) = self.next_tick {
            if now < deadline {
                break;
            }
            self.position_secs += 1;
            if self.position_secs >= self.duration_secs {
                self.position_secs = self.duration_secs;
                self.state = PlaybackState::Finished;
                self.next_tick = None;
                info!("Simulated playback finished");
            } else {
                self.next_tick = Some(deadline + TICK_INTERVAL);
            }
        }
    }

    /// Clamp-seek by `delta` seconds. Never triggers a page change by
    /// itself; the next tick's containment recomputation does that.
    pub fn seek_relative(&mut self, delta: i64) {
        let target = (i64::from(self.position_secs) + delta).clamp(0, i64::from(self.duration_secs));
        self.position_secs = target as u32;
        debug!(position_secs = self.position_secs, "Seeked playback position");
    }

    /// Disarm the ticker without touching position or state.
    pub fn cancel(&mut self) {
        self.next_tick = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_is_idempotent_while_playing() {
        let start = Instant::now();
        let mut clock = PlaybackClock::new();
        clock.start(start);
        let armed = clock.next_tick;
        clock.start(start + Duration::from_millis(500));
        assert_eq!(clock.next_tick, armed);
        assert!(clock.is_playing());
    }

    #[test]
    fn advances_one_second_per_tick_interval() {
        let start = Instant::now();
        let mut clock = PlaybackClock::new();
        clock.start(start);
        clock.tick(start + Duration::from_millis(999));
        assert_eq!(clock.position_secs(), 0);
        clock.tick(start + Duration::from_secs(1));
        assert_eq!(clock.position_secs(), 1);
        // A late tick catches up through every elapsed boundary.
        clock.tick(start + Duration::from_secs(5));
        assert_eq!(clock.position_secs(), 5);
    }

    #[test]
    fn clamps_and_finishes_at_duration() {
        let start = Instant::now();
        let mut clock = PlaybackClock::new();
        clock.start(start);
        clock.tick(start + Duration::from_secs(200));
        assert_eq!(clock.position_secs(), SIMULATED_DURATION_SECS);
        assert_eq!(clock.state(), PlaybackState::Finished);
        assert!(clock.next_tick.is_none());

        // Finished is terminal; restarting is ignored.
        clock.start(start + Duration::from_secs(201));
        assert_eq!(clock.state(), PlaybackState::Finished);
    }

    #[test]
    fn seek_clamps_to_bounds() {
        let start = Instant::now();
        let mut clock = PlaybackClock::new();
        clock.start(start);
        clock.seek_relative(-SEEK_STEP_SECS);
        assert_eq!(clock.position_secs(), 0);
        clock.seek_relative(500);
        assert_eq!(clock.position_secs(), SIMULATED_DURATION_SECS);
        clock.seek_relative(-SEEK_STEP_SECS);
        assert_eq!(clock.position_secs(), SIMULATED_DURATION_SECS - 10);
    }

    #[test]
    fn seek_before_start_stays_at_zero() {
        let mut clock = PlaybackClock::new();
        clock.seek_relative(SEEK_STEP_SECS);
        assert_eq!(clock.position_secs(), 0);
    }
}
