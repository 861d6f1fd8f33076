//! Utility modules

pub mod text;

pub use text::{collapse_line_breaks, is_printable, is_word_char, word_at};
