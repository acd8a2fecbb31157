//! Draggable text-overlay offset.
//!
//! Purely cosmetic: the page text card can be dragged around, and on release
//! it springs back to the origin. It never commits a position and has no
//! effect on page state.

use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct OverlayOffset {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Default)]
pub struct Overlay {
    offset: OverlayOffset,
}

impl Overlay {
    pub fn offset(&self) -> OverlayOffset {
        self.offset
    }

    pub fn drag(&mut self, dx: f32, dy: f32) {
        self.offset = OverlayOffset { x: dx, y: dy };
    }

    /// Spring back to the origin on release.
    pub fn release(&mut self) {
        self.offset = OverlayOffset::default();
    }
}
