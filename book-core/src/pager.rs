use crate::error::NavigationError;

/// Cursor over `len` pages. `current` is always `< len` when `len > 0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pager {
    current: usize,
    len: usize,
}

impl Pager {
    /// A pager at the first page.
    pub fn new(len: usize) -> Self {
        Pager { current: 0, len }
    }

    /// Zero-based index of the visible page, or `None` when empty.
    pub fn current(&self) -> Option<usize> {
        (self.len > 0).then_some(self.current)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn has_next(&self) -> bool {
        self.len > 0 && self.current + 1 < self.len
    }

    pub fn has_previous(&self) -> bool {
        self.len > 0 && self.current > 0
    }

    /// Advance one page, stopping at the last.
    pub fn next(&mut self) {
        if self.has_next() {
            self.current += 1;
        }
    }

    /// Go back one page, stopping at the first.
    pub fn previous(&mut self) {
        self.current = self.current.saturating_sub(1);
    }

    /// Move to the zero-based `index`. Out-of-range targets are refused and
    /// the position stays where it was.
    pub fn jump_to(&mut self, index: usize) -> Result<(), NavigationError> {
        if self.len == 0 {
            return Err(NavigationError::Empty);
        }
        if index >= self.len {
            return Err(NavigationError::OutOfRange {
                index,
                len: self.len,
            });
        }
        self.current = index;
        Ok(())
    }

    /// `"Page 3 of 10"`, or `None` when there is nothing to show.
    pub fn position_label(&self) -> Option<String> {
        self.current()
            .map(|i| format!("Page {} of {}", i + 1, self.len))
    }
}
