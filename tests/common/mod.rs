//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use overlay_input::editable::{EditConstraints, TextBuffer};
use overlay_input::keymap::{Key, Modifiers};
use overlay_input::measure::MonospaceMeasure;
use overlay_input::session::{EditSession, InputEvent};

/// Cell width used by test sessions; pointer x for index `i` is `i * CELL`
pub const CELL: f32 = 10.0;

/// Create a chat-input buffer holding `text` with the cursor at the end
pub fn test_buffer(text: &str) -> TextBuffer {
    TextBuffer::with_text(text, EditConstraints::chat_input())
}

/// Create a session over `text` measured in 10px cells
pub fn test_session(text: &str) -> EditSession {
    EditSession::new(EditConstraints::chat_input())
        .with_measure(Box::new(MonospaceMeasure::new(CELL)))
        .with_text(text)
}

/// Platform command modifier (Cmd on macOS, Ctrl elsewhere)
pub fn cmd_mods() -> Modifiers {
    if cfg!(target_os = "macos") {
        Modifiers::META
    } else {
        Modifiers::CTRL
    }
}

/// Platform drag-copy modifier (Option on macOS, Ctrl elsewhere)
pub fn copy_mods() -> Modifiers {
    if cfg!(target_os = "macos") {
        Modifiers::ALT
    } else {
        Modifiers::CTRL
    }
}

pub fn key(key: Key) -> InputEvent {
    InputEvent::Key {
        key,
        modifiers: Modifiers::NONE,
    }
}

pub fn shift_key(key: Key) -> InputEvent {
    InputEvent::Key {
        key,
        modifiers: Modifiers::SHIFT,
    }
}

/// Ctrl/Cmd + `ch`
pub fn shortcut(ch: char) -> InputEvent {
    InputEvent::Key {
        key: Key::Char(ch),
        modifiers: cmd_mods(),
    }
}

pub fn type_str(session: &mut EditSession, text: &str) {
    for ch in text.chars() {
        session.handle(key(Key::Char(ch)));
    }
}

pub fn press(index: usize, time_ms: u64, modifiers: Modifiers) -> InputEvent {
    InputEvent::PointerDown {
        x: index as f32 * CELL,
        time_ms,
        modifiers,
        window_focused: true,
    }
}

pub fn motion(index: usize, modifiers: Modifiers) -> InputEvent {
    InputEvent::PointerMove {
        x: index as f32 * CELL,
        modifiers,
    }
}

pub fn release(index: usize, modifiers: Modifiers) -> InputEvent {
    InputEvent::PointerUp {
        x: index as f32 * CELL,
        modifiers,
    }
}

/// Press and release at `index`
pub fn click(session: &mut EditSession, index: usize, time_ms: u64) {
    session.handle(press(index, time_ms, Modifiers::NONE));
    session.handle(release(index, Modifiers::NONE));
}

/// Drag a linear selection from `from` to `to` (time far from any other click)
pub fn drag_select(session: &mut EditSession, from: usize, to: usize, time_ms: u64) {
    session.handle(press(from, time_ms, Modifiers::NONE));
    session.handle(motion(to, Modifiers::NONE));
    session.handle(release(to, Modifiers::NONE));
}

/// Pick up the current selection at `grab`, move to `drop` and release
pub fn drag_selection(
    session: &mut EditSession,
    grab: usize,
    drop: usize,
    time_ms: u64,
    modifiers: Modifiers,
) {
    session.handle(press(grab, time_ms, modifiers));
    session.handle(motion(drop, modifiers));
    session.handle(release(drop, modifiers));
}

/// Assert cursor and both selection endpoints are inside the buffer
pub fn assert_indices_in_range(buffer: &TextBuffer) {
    let len = buffer.len_chars();
    let selection = buffer.selection();
    assert!(buffer.cursor() <= len, "cursor {} > len {}", buffer.cursor(), len);
    assert!(selection.anchor <= len, "anchor {} > len {}", selection.anchor, len);
    assert!(selection.extent <= len, "extent {} > len {}", selection.extent, len);
}
