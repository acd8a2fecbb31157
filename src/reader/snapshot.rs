//! View of a session for a rendering layer.
//!
//! The engine exposes discrete targets (opacities, phases, durations) and
//! leaves interpolation to the shell. Snapshot types are exported as
//! TypeScript bindings for the UI.

use serde::Serialize;
use ts_rs::TS;

use super::messages::Mode;
use super::overlay::OverlayOffset;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum PlaybackView {
    Stopped,
    Playing,
    Finished,
}

/// Listen-mode progress for the audio control strip.
#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct AudioProgress {
    pub state: PlaybackView,
    pub position_secs: u32,
    pub duration_secs: u32,
    /// `m:ss` labels, matching the progress bar's time captions.
    pub position_label: String,
    pub duration_label: String,
    /// 0.0..=1.0 fill fraction; 0.0 while the duration is unknown.
    pub progress: f32,
    /// False when the story carries no audio reference; the play control
    /// renders but stays inert.
    pub can_play: bool,
}

#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ReaderSnapshot {
    pub story_id: String,
    pub title: String,
    pub author: String,
    pub mode: Mode,
    /// True while the session waits on the read/listen choice; the shell
    /// shows the cover with the mode buttons.
    pub mode_selection: bool,
    pub cover_image: String,
    pub current_page: usize,
    pub total_pages: usize,
    /// Header badge, e.g. `2/5`.
    pub page_indicator: String,
    pub page_image_url: String,
    pub page_text: String,
    pub is_first_page: bool,
    pub is_last_page: bool,
    pub page_opacity_target: f32,
    pub transitioning: bool,
    pub chrome_opacity_target: f32,
    pub chrome_fade_ms: u64,
    pub overlay_offset: OverlayOffset,
    /// Present only in listen mode.
    pub audio: Option<AudioProgress>,
}

/// Seconds to a `m:ss` caption.
pub fn format_time(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
