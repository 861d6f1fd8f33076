//! TextBuffer - the input field's text with its cursor and selection.
//!
//! Every operation keeps `cursor`, `anchor` and `extent` inside `0..=len`;
//! nothing here can fail. Mutating operations return `true` when the content
//! changed, which is what the session uses to decide whether to record history.

use std::ops::Range;

use crate::util::word_at;

use super::buffer::StringBuffer;
use super::constraints::EditConstraints;
use super::history::HistorySnapshot;
use super::selection::Selection;

/// Single-line editable text with cursor and selection.
#[derive(Debug, Clone)]
pub struct TextBuffer {
    buffer: StringBuffer,
    cursor: usize,
    selection: Selection,
    /// Constraints for this field
    pub constraints: EditConstraints,
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new(EditConstraints::default())
    }
}

impl TextBuffer {
    /// Create an empty buffer with the given constraints
    pub fn new(constraints: EditConstraints) -> Self {
        Self {
            buffer: StringBuffer::new(),
            cursor: 0,
            selection: Selection::collapsed(0),
            constraints,
        }
    }

    /// Create a buffer holding `text` with the cursor at the end.
    /// The initial text is not truncated or filtered.
    pub fn with_text(text: &str, constraints: EditConstraints) -> Self {
        let buffer = StringBuffer::from_text(text);
        let len = buffer.len_chars();
        Self {
            buffer,
            cursor: len,
            selection: Selection::collapsed(len),
            constraints,
        }
    }

    /// Get the text content
    pub fn text(&self) -> &str {
        self.buffer.as_str()
    }

    pub fn len_chars(&self) -> usize {
        self.buffer.len_chars()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Normalized selection span
    pub fn selection_range(&self) -> Range<usize> {
        self.selection.range()
    }

    /// Check if there is a non-empty selection
    pub fn has_selection(&self) -> bool {
        !self.selection.is_empty()
    }

    /// Get the selected text (empty string if no selection)
    pub fn selected_text(&self) -> String {
        if self.selection.is_empty() {
            return String::new();
        }
        self.buffer.slice(self.selection.range())
    }

    pub fn max_length(&self) -> usize {
        self.constraints.max_length
    }

    /// Characters that can still be inserted
    pub fn remaining_capacity(&self) -> usize {
        self.constraints.remaining_capacity(self.len_chars())
    }

    /// Capture content, cursor and selection for history
    pub fn snapshot(&self) -> HistorySnapshot {
        HistorySnapshot {
            content: self.buffer.as_str().to_string(),
            cursor: self.cursor,
            anchor: self.selection.anchor,
            extent: self.selection.extent,
        }
    }

    /// Collapse selection to cursor position
    pub fn collapse_selection(&mut self) {
        self.selection = Selection::collapsed(self.cursor);
    }

    /// Pull cursor and selection back into `0..=len`
    fn clamp_indices(&mut self) {
        let len = self.buffer.len_chars();
        self.cursor = self.cursor.min(len);
        self.selection.clamp_to(len);
        debug_assert!(self.cursor <= len);
    }
}

// =============================================================================
// Movement and Selection
// =============================================================================

impl TextBuffer {
    /// Move cursor by `delta` characters, clamped to the text
    pub fn move_cursor(&mut self, delta: isize, extend_selection: bool) {
        let target = if delta.is_negative() {
            self.cursor.saturating_sub(delta.unsigned_abs())
        } else {
            self.cursor.saturating_add(delta.unsigned_abs())
        };
        self.jump_to(target, extend_selection);
    }

    /// Move cursor to an absolute index, clamped to the text.
    ///
    /// When extending, an empty selection is first anchored at the old cursor;
    /// afterwards only the extent follows the cursor.
    pub fn jump_to(&mut self, position: usize, extend_selection: bool) {
        let target = position.min(self.len_chars());

        if extend_selection {
            if self.selection.is_empty() {
                self.selection.anchor = self.cursor;
            }
            self.cursor = target;
            self.selection.extent = target;
        } else {
            self.cursor = target;
            self.collapse_selection();
        }
    }

    /// Set anchor and extent directly; the cursor follows the extent
    pub fn select_range(&mut self, anchor: usize, extent: usize) {
        let len = self.len_chars();
        self.selection = Selection::new(anchor.min(len), extent.min(len));
        self.cursor = self.selection.extent;
    }

    /// Select all text
    pub fn select_all(&mut self) {
        let len = self.len_chars();
        self.selection = Selection::new(0, len);
        self.cursor = len;
    }

    /// Select the word containing `index`; a non-word character yields an
    /// empty selection at `index`
    pub fn select_word_at(&mut self, index: usize) -> Range<usize> {
        let range = word_at(&self.buffer.chars(), index);
        self.select_range(range.start, range.end);
        tracing::debug!(target: "selection", ?range, "select word");
        range
    }
}

// =============================================================================
// Editing Operations
// =============================================================================

impl TextBuffer {
    /// Insert text at the cursor, replacing any selection.
    ///
    /// Characters rejected by the filter are dropped and the rest is truncated
    /// to the remaining capacity. Returns true if the content changed.
    pub fn insert(&mut self, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }

        let accepted: String = text
            .chars()
            .filter(|&ch| self.constraints.is_char_allowed(ch))
            .collect();
        if accepted.is_empty() {
            return false;
        }

        let deleted = self.delete_selection();

        let inserted = self.insert_at(self.cursor, &accepted);
        self.cursor += inserted;
        self.collapse_selection();

        deleted || inserted > 0
    }

    /// Insert a single character at the cursor
    pub fn insert_char(&mut self, ch: char) -> bool {
        let mut tmp = [0u8; 4];
        self.insert(ch.encode_utf8(&mut tmp))
    }

    /// Raw insertion at `index`, truncated to the remaining capacity.
    /// Leaves cursor and selection alone. Returns the number of characters inserted.
    pub fn insert_at(&mut self, index: usize, text: &str) -> usize {
        let room = self.remaining_capacity();
        let count = text.chars().count().min(room);
        if count == 0 {
            return 0;
        }

        let truncated: String = text.chars().take(count).collect();
        let index = index.min(self.len_chars());
        self.buffer.insert(index, &truncated);

        if count < text.chars().count() {
            tracing::debug!(
                target: "selection",
                dropped = text.chars().count() - count,
                "insert truncated at capacity"
            );
        }
        count
    }

    /// Raw removal of `range`, clamping cursor and selection afterwards
    pub fn remove_range(&mut self, range: Range<usize>) {
        self.buffer.remove(range);
        self.clamp_indices();
    }

    /// Delete character before cursor (Backspace)
    pub fn delete_backward(&mut self) -> bool {
        if self.delete_selection() {
            return true;
        }
        if self.cursor == 0 {
            return false;
        }

        self.buffer.remove(self.cursor - 1..self.cursor);
        self.cursor -= 1;
        self.collapse_selection();
        true
    }

    /// Delete character after cursor (Delete key)
    pub fn delete_forward(&mut self) -> bool {
        if self.delete_selection() {
            return true;
        }
        if self.cursor >= self.len_chars() {
            return false;
        }

        self.buffer.remove(self.cursor..self.cursor + 1);
        self.collapse_selection();
        true
    }

    /// Delete selection if any, collapsing the cursor to its start
    pub fn delete_selection(&mut self) -> bool {
        if self.selection.is_empty() {
            return false;
        }

        let range = self.selection.range();
        self.buffer.remove(range.clone());
        self.cursor = range.start;
        self.collapse_selection();
        self.clamp_indices();
        true
    }

    /// Replace everything, bypassing capacity and filtering (history restore).
    /// Cursor and selection are clamped to the new text.
    pub fn replace_all(&mut self, new_content: &str) {
        self.buffer.set_content(new_content);
        self.clamp_indices();
    }

    /// Restore content, cursor and selection from a snapshot
    pub fn restore(&mut self, snapshot: &HistorySnapshot) {
        self.buffer.set_content(&snapshot.content);
        self.cursor = snapshot.cursor;
        self.selection = Selection::new(snapshot.anchor, snapshot.extent);
        self.clamp_indices();
    }

    /// Clear the buffer and reset cursor. Returns true if there was text.
    pub fn clear(&mut self) -> bool {
        let had_text = !self.buffer.is_empty();
        self.buffer.clear();
        self.cursor = 0;
        self.collapse_selection();
        had_text
    }
}
