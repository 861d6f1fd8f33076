//! Character classification and small string helpers for the input field

use std::ops::Range;

/// Check if a character belongs to a word (alphanumeric or underscore)
pub fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// Default character filter for typed input.
///
/// Rejects control and format characters, private-use code points, and every
/// separator except the ASCII space (no-break spaces, U+2028, U+2029).
pub fn is_printable(ch: char) -> bool {
    if ch == ' ' {
        return true;
    }
    !(ch.is_control() || ch.is_whitespace() || is_format(ch) || is_private_use(ch))
}

fn is_format(ch: char) -> bool {
    matches!(
        ch,
        '\u{00AD}'
            | '\u{061C}'
            | '\u{180E}'
            | '\u{200B}'..='\u{200F}'
            | '\u{202A}'..='\u{202E}'
            | '\u{2060}'..='\u{2064}'
            | '\u{2066}'..='\u{206F}'
            | '\u{FEFF}'
            | '\u{FFF9}'..='\u{FFFB}'
    )
}

fn is_private_use(ch: char) -> bool {
    matches!(ch, '\u{E000}'..='\u{F8FF}' | '\u{F0000}'..='\u{10FFFF}')
}

/// Find the word containing the character at `index`.
///
/// A word is a maximal run of [`is_word_char`] characters. When `index` does not
/// land on a word character (including `index == len`), the result is the empty
/// range `index..index`. An empty slice always yields `0..0`.
pub fn word_at(chars: &[char], index: usize) -> Range<usize> {
    if chars.is_empty() {
        return 0..0;
    }

    let index = index.min(chars.len());
    match chars.get(index) {
        Some(&ch) if is_word_char(ch) => {}
        _ => return index..index,
    }

    let mut start = index;
    let mut end = index;

    while start > 0 && is_word_char(chars[start - 1]) {
        start -= 1;
    }
    while end < chars.len() && is_word_char(chars[end]) {
        end += 1;
    }

    start..end
}

/// Collapse `\r\n`, `\r` and `\n` into single spaces (single-line field constraint)
pub fn collapse_line_breaks(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                result.push(' ');
            }
            '\n' => result.push(' '),
            _ => result.push(ch),
        }
    }

    result
}
