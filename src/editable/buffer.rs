//! Character-indexed string storage for the single-line input field.
//!
//! All offsets are code-point indices, never byte offsets. Out-of-range offsets
//! are clamped to the end of the text.

use std::ops::Range;

/// Text storage backed by `String`, addressed by character index
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringBuffer {
    text: String,
    len_chars: usize,
}

impl StringBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a StringBuffer from a string slice
    pub fn from_text(s: &str) -> Self {
        Self {
            text: s.to_string(),
            len_chars: s.chars().count(),
        }
    }

    /// Access the underlying string
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Total length in characters
    pub fn len_chars(&self) -> usize {
        self.len_chars
    }

    pub fn is_empty(&self) -> bool {
        self.len_chars == 0
    }

    /// Collect the characters (used by word-boundary scans)
    pub fn chars(&self) -> Vec<char> {
        self.text.chars().collect()
    }

    /// Get slice of text as String (by character indices)
    pub fn slice(&self, range: Range<usize>) -> String {
        let start = range.start.min(self.len_chars);
        let end = range.end.min(self.len_chars);
        if start >= end {
            return String::new();
        }
        self.text.chars().skip(start).take(end - start).collect()
    }

    /// Insert text at character offset
    pub fn insert(&mut self, offset: usize, text: &str) {
        let byte_offset = self.char_to_byte(offset);
        self.text.insert_str(byte_offset, text);
        self.len_chars += text.chars().count();
    }

    /// Remove text in character range
    pub fn remove(&mut self, range: Range<usize>) {
        let start = range.start.min(self.len_chars);
        let end = range.end.min(self.len_chars);
        if start >= end {
            return;
        }
        let start_byte = self.char_to_byte(start);
        let end_byte = self.char_to_byte(end);
        self.text.replace_range(start_byte..end_byte, "");
        self.len_chars -= end - start;
    }

    /// Set content, replacing everything
    pub fn set_content(&mut self, text: &str) {
        self.text.clear();
        self.text.push_str(text);
        self.len_chars = text.chars().count();
    }

    /// Clear all content
    pub fn clear(&mut self) {
        self.text.clear();
        self.len_chars = 0;
    }

    /// Convert char offset to byte offset
    fn char_to_byte(&self, char_offset: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_offset)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_buffer_basic() {
        let buf = StringBuffer::from_text("hello");
        assert_eq!(buf.len_chars(), 5);
        assert_eq!(buf.slice(1..2), "e");
        assert_eq!(buf.slice(5..6), "");
    }

    #[test]
    fn test_string_buffer_utf8() {
        let buf = StringBuffer::from_text("héllo");
        assert_eq!(buf.len_chars(), 5);
        assert_eq!(buf.as_str().len(), 6); // é is 2 bytes
        assert_eq!(buf.slice(1..2), "é");
    }

    #[test]
    fn test_string_buffer_insert_utf8() {
        let mut buf = StringBuffer::from_text("héllo");
        buf.insert(2, "X"); // After é
        assert_eq!(buf.as_str(), "héXllo");
        assert_eq!(buf.len_chars(), 6);
    }

    #[test]
    fn test_string_buffer_insert_past_end_appends() {
        let mut buf = StringBuffer::from_text("ab");
        buf.insert(10, "c");
        assert_eq!(buf.as_str(), "abc");
    }

    #[test]
    fn test_string_buffer_remove() {
        let mut buf = StringBuffer::from_text("hello world");
        buf.remove(5..11);
        assert_eq!(buf.as_str(), "hello");
        assert_eq!(buf.len_chars(), 5);
    }

    #[test]
    fn test_string_buffer_remove_clamps() {
        let mut buf = StringBuffer::from_text("hello");
        buf.remove(3..50);
        assert_eq!(buf.as_str(), "hel");
        buf.remove(4..2);
        assert_eq!(buf.as_str(), "hel");
    }

    #[test]
    fn test_string_buffer_slice() {
        let buf = StringBuffer::from_text("hello world");
        assert_eq!(buf.slice(0..5), "hello");
        assert_eq!(buf.slice(6..11), "world");
        assert_eq!(buf.slice(9..40), "ld");
        assert_eq!(buf.slice(4..2), "");
    }

    #[test]
    fn test_buffer_clear() {
        let mut buf = StringBuffer::from_text("hello");
        buf.clear();
        assert!(buf.is_empty());
        assert_eq!(buf.as_str(), "");
    }
}
