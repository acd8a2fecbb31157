//! The story reader state machine.
//!
//! Everything here is headless and time-injected: a rendering shell feeds
//! [`Command`]s and a clock into a [`ReaderSession`] and renders its
//! [`snapshot::ReaderSnapshot`], interpolating toward the discrete opacity
//! targets the session exposes.

mod chrome;
mod gesture;
mod messages;
mod overlay;
mod pager;
mod playback;
mod session;
mod snapshot;
mod transition;

pub use messages::{Command, Effect, Mode};
pub use overlay::OverlayOffset;
pub use playback::{PlaybackState, SIMULATED_DURATION_SECS};
pub use session::{OpenError, ReaderSession};
pub use snapshot::{format_time, AudioProgress, PlaybackView, ReaderSnapshot};
