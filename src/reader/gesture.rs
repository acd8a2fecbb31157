//! Swipe-release interpretation.

/// Horizontal displacement (in screen pixels) a release must exceed to count
/// as a page swipe.
pub const SWIPE_THRESHOLD: f32 = 50.0;

/// Converts a drag-release displacement into at most one page request.
/// Swiping left advances, swiping right goes back; releases inside the dead
/// zone or against a boundary page produce nothing.
pub fn page_request(dx: f32, current: usize, count: usize) -> Option<usize> {
    if dx <= -SWIPE_THRESHOLD && current + 1 < count {
        Some(current + 1)
    } else if dx >= SWIPE_THRESHOLD && current > 0 {
        Some(current - 1)
    } else {
        None
    }
}
