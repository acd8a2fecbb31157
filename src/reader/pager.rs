//! Page position model.

/// Current page index with its bounds. The index is mutated only by the
/// transition animator's commit so logical and visual state stay in step.
#[derive(Debug, Clone, Copy)]
pub struct Pager {
    current: usize,
    count: usize,
}

impl Pager {
    pub fn new(count: usize) -> Self {
        Pager { current: 0, count }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    pub fn is_last(&self) -> bool {
        self.count == 0 || self.current == self.count - 1
    }

    /// No-op when `index` is out of bounds.
    pub fn go_to(&mut self, index: usize) {
        if index < self.count {
            self.current = index;
        }
    }

    pub fn reset(&mut self) {
        self.current = 0;
    }
}
