//! One open reader screen's state.
//!
//! A session is created per `open` call against a story id, owns every timer
//! deadline for that screen, and is discarded (never reused) when the story
//! changes or the screen closes. Closing disarms all deadlines so no stale
//! callback can mutate a defunct session.

use std::time::Instant;
use tracing::{debug, info, warn};

use crate::catalog::{Catalog, Story};

use super::chrome::Chrome;
use super::gesture;
use super::messages::{Command, Effect, Mode};
use super::overlay::Overlay;
use super::pager::Pager;
use super::playback::{PlaybackClock, PlaybackState, SEEK_STEP_SECS};
use super::snapshot::{format_time, AudioProgress, PlaybackView, ReaderSnapshot};
use super::transition::Transition;

/// The single modeled failure: the id has no match in the content source.
/// Everything else is logged and swallowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenError {
    StoryNotFound(String),
}

impl std::fmt::Display for OpenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OpenError::StoryNotFound(id) => write!(f, "story not found: {id}"),
        }
    }
}

impl std::error::Error for OpenError {}

#[derive(Debug)]
pub struct ReaderSession {
    story: Story,
    mode: Mode,
    pager: Pager,
    transition: Transition,
    chrome: Chrome,
    playback: PlaybackClock,
    overlay: Overlay,
    closed: bool,
}

impl ReaderSession {
    /// The `openReader` navigation boundary. `entry` is the optional mode
    /// parameter: `"read"` and `"listen"` jump straight into a mode,
    /// `"open"` (or nothing) launches into mode selection. An unknown story
    /// id is terminal: no session is created.
    pub fn open(
        catalog: &Catalog,
        story_id: &str,
        entry: Option<&str>,
        now: Instant,
    ) -> Result<Self, OpenError> {
        let story = catalog
            .find(story_id)
            .cloned()
            .ok_or_else(|| OpenError::StoryNotFound(story_id.to_string()))?;

        let mut session = ReaderSession {
            pager: Pager::new(story.pages.len()),
            story,
            mode: Mode::Unset,
            transition: Transition::new(),
            chrome: Chrome::new(now),
            playback: PlaybackClock::new(),
            overlay: Overlay::default(),
            closed: false,
        };
        info!(story = %session.story.id, ?entry, "Opened reader");

        match entry {
            Some("read") => session.select_mode(Mode::Read, now),
            Some("listen") => session.select_mode(Mode::Listen, now),
            Some("open") | None => {}
            Some(other) => {
                warn!(mode = other, "Unknown entry mode; launching mode selection");
            }
        }
        Ok(session)
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn current_page(&self) -> usize {
        self.pager.current()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn story(&self) -> &Story {
        &self.story
    }

    pub fn playback_state(&self) -> PlaybackState {
        self.playback.state()
    }

    pub fn playback_position_secs(&self) -> u32 {
        self.playback.position_secs()
    }

    /// Apply one command at the given instant.
    pub fn handle(&mut self, command: Command, now: Instant) -> Vec<Effect> {
        let mut effects = Vec::new();
        if self.closed {
            debug!(?command, "Command ignored on closed session");
            return effects;
        }
        match command {
            Command::SelectReadMode => self.select_mode(Mode::Read, now),
            Command::SelectListenMode => self.select_mode(Mode::Listen, now),
            Command::NextPage => {
                if !self.pager.is_last() {
                    self.transition.request(self.pager.current() + 1, now);
                }
            }
            Command::PreviousPage => {
                if !self.pager.is_first() {
                    self.transition.request(self.pager.current() - 1, now);
                }
            }
            Command::SwipeReleased { dx } => {
                if let Some(target) =
                    gesture::page_request(dx, self.pager.current(), self.pager.count())
                {
                    self.transition.request(target, now);
                }
            }
            Command::OverlayDragged { dx, dy } => self.overlay.drag(dx, dy),
            Command::OverlayReleased => self.overlay.release(),
            Command::HeaderTouched => self.chrome.interaction(now),
            Command::Play => self.start_playback(now),
            Command::SeekForward => self.seek(SEEK_STEP_SECS),
            Command::SeekBackward => self.seek(-SEEK_STEP_SECS),
            Command::GoBack => {
                info!(story = %self.story.id, "Leaving reader");
                effects.push(Effect::GoBack);
            }
        }
        effects
    }

    /// Advance every timed concern to `now`: chrome dimming, the in-flight
    /// page fade, and (in listen mode) the playback clock plus its
    /// position-to-page sync. The sync is the only automatic driver of page
    /// change and competes with gestures solely through the animator's
    /// drop-while-transitioning rule.
    pub fn tick(&mut self, now: Instant) {
        if self.closed {
            return;
        }
        self.chrome.tick(now);

        if let Some(target) = self.transition.tick(now) {
            self.pager.go_to(target);
            info!(
                story = %self.story.id,
                page = self.pager.current() + 1,
                "Page committed"
            );
        }

        if self.mode == Mode::Listen {
            self.playback.tick(now);
            if self.playback.is_playing() {
                let containing = self.story.page_at_position(self.playback.position_secs());
                if containing != self.pager.current() {
                    self.transition.request(containing, now);
                }
            }
        }
    }

    /// Tear the session down: disarm every deadline. Required whenever the
    /// screen closes or the story id changes; a closed session ignores all
    /// further commands and ticks.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        self.playback.cancel();
        self.chrome.cancel();
        self.transition.cancel();
        info!(story = %self.story.id, "Closed reader session");
    }

    pub fn snapshot(&self) -> ReaderSnapshot {
        let page = self.story.pages.get(self.pager.current());
        let audio = (self.mode == Mode::Listen).then(|| {
            let duration = self.playback.duration_secs();
            AudioProgress {
                state: match self.playback.state() {
                    PlaybackState::Stopped => PlaybackView::Stopped,
                    PlaybackState::Playing => PlaybackView::Playing,
                    PlaybackState::Finished => PlaybackView::Finished,
                },
                position_secs: self.playback.position_secs(),
                duration_secs: duration,
                position_label: format_time(self.playback.position_secs()),
                duration_label: format_time(duration),
                progress: if duration > 0 {
                    self.playback.position_secs() as f32 / duration as f32
                } else {
                    0.0
                },
                can_play: self.story.audio_url.is_some(),
            }
        });

        ReaderSnapshot {
            story_id: self.story.id.clone(),
            title: self.story.title.clone(),
            author: self.story.author.clone(),
            mode: self.mode,
            mode_selection: self.mode == Mode::Unset,
            cover_image: self.story.cover_image.clone(),
            current_page: self.pager.current(),
            total_pages: self.pager.count(),
            page_indicator: format!("{}/{}", self.pager.current() + 1, self.pager.count()),
            page_image_url: page.map(|p| p.image_url.clone()).unwrap_or_default(),
            page_text: page.map(|p| p.text.clone()).unwrap_or_default(),
            is_first_page: self.pager.is_first(),
            is_last_page: self.pager.is_last(),
            page_opacity_target: self.transition.opacity_target(),
            transitioning: !self.transition.is_idle(),
            chrome_opacity_target: self.chrome.opacity_target(),
            chrome_fade_ms: self.chrome.fade_duration().as_millis() as u64,
            overlay_offset: self.overlay.offset(),
            audio,
        }
    }

    fn select_mode(&mut self, mode: Mode, now: Instant) {
        if self.mode != Mode::Unset {
            debug!(current = ?self.mode, requested = ?mode, "Mode already chosen; ignored");
            return;
        }
        self.mode = mode;
        self.pager.reset();
        info!(story = %self.story.id, ?mode, "Mode selected");
        if mode == Mode::Listen {
            self.start_playback(now);
        }
    }

    fn start_playback(&mut self, now: Instant) {
        if self.mode != Mode::Listen {
            debug!("Play ignored outside listen mode");
            return;
        }
        if self.story.audio_url.is_none() {
            // Feature stays inert rather than surfacing an error.
            warn!(story = %self.story.id, "No audio reference; playback stays unstarted");
            return;
        }
        info!(title = %self.story.title, "Loading audio");
        self.playback.start(now);
    }

    fn seek(&mut self, delta: i64) {
        if self.mode == Mode::Listen {
            self.playback.seek_relative(delta);
        }
    }
}
