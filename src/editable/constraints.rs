//! Edit constraints for the input field.
//!
//! Constraints define how much text the field accepts and which characters.

use crate::util::is_printable;

/// Character filter function type
pub type CharFilter = fn(char) -> bool;

/// Default capacity of the chat input field, in characters
pub const DEFAULT_MAX_LENGTH: usize = 60;

/// Constraints that limit what the field accepts.
#[derive(Debug, Clone)]
pub struct EditConstraints {
    /// Maximum length in characters
    pub max_length: usize,

    /// Character filter (None = all characters allowed)
    /// Returns true if character is allowed
    pub char_filter: Option<CharFilter>,
}

impl Default for EditConstraints {
    fn default() -> Self {
        Self::chat_input()
    }
}

impl EditConstraints {
    /// The overlay chat box: 60 printable characters
    pub fn chat_input() -> Self {
        Self {
            max_length: DEFAULT_MAX_LENGTH,
            char_filter: Some(is_printable),
        }
    }

    /// Printable single-line input with a custom capacity
    pub fn with_max_length(max_length: usize) -> Self {
        Self {
            max_length,
            ..Self::chat_input()
        }
    }

    /// Unfiltered input (every character accepted)
    pub fn unfiltered(max_length: usize) -> Self {
        Self {
            max_length,
            char_filter: None,
        }
    }

    /// Check if a character passes the filter (if any)
    pub fn is_char_allowed(&self, ch: char) -> bool {
        match self.char_filter {
            Some(filter) => filter(ch),
            None => true,
        }
    }

    /// Characters that can still be added to a buffer of `current_len`
    pub fn remaining_capacity(&self, current_len: usize) -> usize {
        self.max_length.saturating_sub(current_len)
    }
}
