//! Storytime: the reading engine behind a children's storybook app.
//!
//! The crate owns the story catalog and the per-screen reader session state
//! machine (page position, cross-fade transitions, swipe interpretation,
//! auto-hiding chrome, and a simulated listen-mode playback clock). It does
//! no rendering: a shell drives sessions with commands and a clock and draws
//! their snapshots.

pub mod catalog;
pub mod config;
pub mod reader;

use std::fs;
use std::path::Path;
use ts_rs::TS;

fn export_single_type<T: TS + 'static>(out_dir: &Path) -> Result<(), String> {
    T::export_all_to(out_dir).map_err(|err| err.to_string())
}

/// Export the TypeScript bindings the rendering shell consumes.
pub fn export_ts_bindings(out_dir: &Path) -> Result<(), String> {
    fs::create_dir_all(out_dir)
        .map_err(|err| format!("Failed to create {}: {err}", out_dir.display()))?;

    export_single_type::<catalog::Story>(out_dir)?;
    export_single_type::<catalog::StoryPage>(out_dir)?;
    export_single_type::<catalog::StorySummary>(out_dir)?;
    export_single_type::<reader::Mode>(out_dir)?;
    export_single_type::<reader::PlaybackView>(out_dir)?;
    export_single_type::<reader::AudioProgress>(out_dir)?;
    export_single_type::<reader::OverlayOffset>(out_dir)?;
    export_single_type::<reader::ReaderSnapshot>(out_dir)?;
    Ok(())
}
