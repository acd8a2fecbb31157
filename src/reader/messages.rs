//! Commands into, and effects out of, a reader session.

use serde::Serialize;
use ts_rs::TS;

/// Reader mode. A session opens `Unset` (mode selection) unless the
/// navigation entry named a concrete mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Mode {
    Unset,
    Read,
    Listen,
}

/// Commands a rendering shell feeds into the session. Each is handled with
/// an injected `Instant`; timed behavior advances only through
/// `ReaderSession::tick`.
#[derive(Debug, Clone, Copy)]
pub enum Command {
    SelectReadMode,
    SelectListenMode,
    NextPage,
    PreviousPage,
    /// Drag-release on the page with the final horizontal displacement.
    SwipeReleased { dx: f32 },
    OverlayDragged { dx: f32, dy: f32 },
    OverlayReleased,
    HeaderTouched,
    Play,
    SeekForward,
    SeekBackward,
    GoBack,
}

/// Work the session cannot perform itself. The only outbound signal is the
/// "go back" handed to the enclosing navigation shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    GoBack,
}
