//! Selection type for the single-line input field.

use std::ops::Range;

/// A text selection with anchor (start point) and extent (moving point).
/// The anchor stays fixed while the extent moves during selection extension.
/// Anchor may be greater than extent; read [`Selection::start`]/[`Selection::end`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    /// Where the selection started (fixed point)
    pub anchor: usize,
    /// Where the selection currently ends (moving point)
    pub extent: usize,
}

impl Selection {
    pub fn new(anchor: usize, extent: usize) -> Self {
        Self { anchor, extent }
    }

    /// Create a collapsed selection (cursor with no selection)
    pub fn collapsed(index: usize) -> Self {
        Self {
            anchor: index,
            extent: index,
        }
    }

    /// Check if selection is empty (anchor == extent)
    pub fn is_empty(&self) -> bool {
        self.anchor == self.extent
    }

    pub fn start(&self) -> usize {
        self.anchor.min(self.extent)
    }

    pub fn end(&self) -> usize {
        self.anchor.max(self.extent)
    }

    /// Normalized span `start..end`
    pub fn range(&self) -> Range<usize> {
        self.start()..self.end()
    }

    pub fn len(&self) -> usize {
        self.end() - self.start()
    }

    /// Check if selection is reversed (extent before anchor)
    pub fn is_reversed(&self) -> bool {
        self.extent < self.anchor
    }

    /// Check if an index is within this selection (end exclusive)
    pub fn contains(&self, index: usize) -> bool {
        index >= self.start() && index < self.end()
    }

    /// Clamp both endpoints to `0..=len`
    pub fn clamp_to(&mut self, len: usize) {
        self.anchor = self.anchor.min(len);
        self.extent = self.extent.min(len);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_collapsed() {
        let sel = Selection::collapsed(5);
        assert!(sel.is_empty());
        assert_eq!(sel.len(), 0);
    }

    #[test]
    fn test_selection_start_end() {
        let forward = Selection::new(0, 5);
        assert_eq!(forward.range(), 0..5);
        assert!(!forward.is_reversed());

        let backward = Selection::new(5, 0);
        assert_eq!(backward.start(), 0);
        assert_eq!(backward.end(), 5);
        assert!(backward.is_reversed());
    }

    #[test]
    fn test_selection_contains() {
        let sel = Selection::new(8, 2);
        assert!(!sel.contains(1));
        assert!(sel.contains(2));
        assert!(sel.contains(7));
        assert!(!sel.contains(8)); // End is exclusive
    }

    #[test]
    fn test_selection_clamp() {
        let mut sel = Selection::new(10, 3);
        sel.clamp_to(4);
        assert_eq!(sel, Selection::new(4, 3));
    }
}
