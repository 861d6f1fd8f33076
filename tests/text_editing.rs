//! Text editing tests - insert, delete, capacity, submission

mod common;

use common::{key, shortcut, test_buffer, test_session, type_str};
use overlay_input::editable::{EditConstraints, TextBuffer};
use overlay_input::keymap::Key;
use overlay_input::Cmd;

// ========================================================================
// Typing
// ========================================================================

#[test]
fn test_type_then_undo() {
    let mut session = test_session("");
    type_str(&mut session, "hello");
    assert_eq!(session.text(), "hello");
    assert_eq!(session.cursor(), 5);

    session.handle(shortcut('z'));
    assert_eq!(session.text(), "hell");
    assert_eq!(session.cursor(), 4);
}

#[test]
fn test_typing_replaces_select_all() {
    let mut session = test_session("hello world");
    session.handle(shortcut('a'));
    type_str(&mut session, "bye");
    assert_eq!(session.text(), "bye");
    assert_eq!(session.cursor(), 3);
    assert!(!session.buffer().has_selection());
}

#[test]
fn test_insert_empty_changes_nothing() {
    let mut buffer = test_buffer("hello");
    buffer.select_range(4, 1);
    let before = buffer.snapshot();
    assert!(!buffer.insert(""));
    assert_eq!(buffer.snapshot(), before);

    let mut session = test_session("hello");
    let undo_before = session.history().undo_count();
    session.handle(overlay_input::InputEvent::Text {
        text: String::new(),
    });
    assert_eq!(session.history().undo_count(), undo_before);
}

#[test]
fn test_typing_past_capacity_is_truncated() {
    let mut session = test_session("");
    let long: String = "x".repeat(75);
    type_str(&mut session, &long);
    assert_eq!(session.buffer().len_chars(), 60);
    assert_eq!(session.cursor(), 60);
}

#[test]
fn test_insert_text_truncates_in_one_step() {
    let mut buffer = TextBuffer::with_text("abcd", EditConstraints::with_max_length(6));
    assert!(buffer.insert("123456"));
    assert_eq!(buffer.text(), "abcd12");
    assert_eq!(buffer.len_chars(), buffer.max_length());
    assert_eq!(buffer.remaining_capacity(), 0);
}

#[test]
fn test_control_characters_are_dropped() {
    let mut session = test_session("");
    session.handle(key(Key::Char('\u{1b}')));
    session.handle(key(Key::Char('\t')));
    assert_eq!(session.text(), "");
    assert!(!session.history().can_undo());

    type_str(&mut session, "ok");
    assert_eq!(session.text(), "ok");
}

#[test]
fn test_multibyte_characters_count_as_one() {
    let mut session = test_session("");
    type_str(&mut session, "héllo😀");
    assert_eq!(session.buffer().len_chars(), 6);
    assert_eq!(session.cursor(), 6);

    session.handle(key(Key::Backspace));
    assert_eq!(session.text(), "héllo");
}

// ========================================================================
// Deletion
// ========================================================================

#[test]
fn test_backspace_and_delete() {
    let mut session = test_session("abcd");
    session.handle(key(Key::Left));
    session.handle(key(Key::Left));

    session.handle(key(Key::Backspace));
    assert_eq!(session.text(), "acd");
    assert_eq!(session.cursor(), 1);

    session.handle(key(Key::Delete));
    assert_eq!(session.text(), "ad");
    assert_eq!(session.cursor(), 1);
}

#[test]
fn test_delete_at_edges_is_noop() {
    let mut session = test_session("ab");
    assert_eq!(session.handle(key(Key::Delete)), None);
    session.handle(key(Key::Home));
    assert_eq!(session.handle(key(Key::Backspace)), None);
    assert_eq!(session.text(), "ab");
    assert!(!session.history().can_undo());
}

#[test]
fn test_shift_selection_then_backspace() {
    let mut session = test_session("hello");
    session.handle(common::shift_key(Key::Left));
    session.handle(common::shift_key(Key::Left));
    assert_eq!(session.buffer().selected_text(), "lo");

    session.handle(key(Key::Backspace));
    assert_eq!(session.text(), "hel");
    assert_eq!(session.cursor(), 3);
}

// ========================================================================
// Submission
// ========================================================================

#[test]
fn test_submit_trims_and_clears() {
    let mut session = test_session("");
    type_str(&mut session, "  what's up?  ");
    let cmd = session.handle(key(Key::Enter));
    assert_eq!(cmd, Some(Cmd::Submit("what's up?".to_string())));
    assert_eq!(session.text(), "");
    assert_eq!(session.cursor(), 0);
}

#[test]
fn test_submit_empty_does_nothing() {
    let mut session = test_session("");
    assert_eq!(session.handle(key(Key::Enter)), None);
    assert!(!session.history().can_undo());
}

#[test]
fn test_submit_whitespace_only_clears_without_submission() {
    let mut session = test_session("");
    type_str(&mut session, "   ");
    let cmd = session.handle(key(Key::Enter));
    assert!(cmd.as_ref().and_then(Cmd::submission).is_none());
    assert_eq!(session.text(), "");
}
