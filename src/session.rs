//! Edit session - the surface the host event loop drives
//!
//! Owns the text buffer and its history together with the pointer state
//! (click tracking, linear selection, drag) and the clipboard bridge. Each
//! event is applied completely before the next; nothing here blocks.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::clipboard::ClipboardBridge;
use crate::commands::Cmd;
use crate::editable::{
    DragState, EditConstraints, EditHistory, HistorySnapshot, MoveTarget, TextBuffer, TextEditMsg,
    DEFAULT_HISTORY_CAPACITY,
};
use crate::keymap::{key_to_msg, Key, Modifiers};
use crate::measure::{index_at_x, MonospaceMeasure, TextMeasure};
use crate::mouse::{ClickKind, ClickTracker};
use crate::tracing::SessionSnapshot;
use crate::util::collapse_line_breaks;

fn default_focused() -> bool {
    true
}

/// Raw input delivered by the host, one per callback
///
/// Pointer x-coordinates are relative to the text origin of the field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    Key {
        key: Key,
        #[serde(default)]
        modifiers: Modifiers,
    },
    /// Committed text from the platform (typed or composed), inserted as one edit
    Text { text: String },
    PointerDown {
        x: f32,
        time_ms: u64,
        #[serde(default)]
        modifiers: Modifiers,
        #[serde(default = "default_focused")]
        window_focused: bool,
    },
    PointerMove {
        x: f32,
        #[serde(default)]
        modifiers: Modifiers,
    },
    PointerUp {
        x: f32,
        #[serde(default)]
        modifiers: Modifiers,
    },
    /// Field shown / focused
    Activate,
    /// Field hidden or focus lost
    Deactivate,
}

impl InputEvent {
    /// Short name used in trace output
    pub fn kind(&self) -> &'static str {
        match self {
            InputEvent::Key { .. } => "key",
            InputEvent::Text { .. } => "text",
            InputEvent::PointerDown { .. } => "pointer_down",
            InputEvent::PointerMove { .. } => "pointer_move",
            InputEvent::PointerUp { .. } => "pointer_up",
            InputEvent::Activate => "activate",
            InputEvent::Deactivate => "deactivate",
        }
    }
}

/// The chat input field's editing session
#[derive(Debug)]
pub struct EditSession {
    buffer: TextBuffer,
    history: EditHistory,
    clicks: ClickTracker,
    drag: DragState,
    clipboard: ClipboardBridge,
    measure: Box<dyn TextMeasure>,
    active: bool,
    /// Primary button held after a single click outside the selection
    selecting: bool,
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new(EditConstraints::default())
    }
}

impl EditSession {
    /// Empty, active session with an in-process clipboard and 8px monospace measurement
    pub fn new(constraints: EditConstraints) -> Self {
        let buffer = TextBuffer::new(constraints);
        let history = EditHistory::rooted_at(buffer.snapshot(), DEFAULT_HISTORY_CAPACITY);
        Self {
            buffer,
            history,
            clicks: ClickTracker::default(),
            drag: DragState::new(),
            clipboard: ClipboardBridge::in_process(),
            measure: Box::new(MonospaceMeasure::default()),
            active: true,
            selecting: false,
        }
    }

    /// Start from `text` (cursor at end); history is re-rooted there
    pub fn with_text(mut self, text: &str) -> Self {
        self.buffer = TextBuffer::with_text(text, self.buffer.constraints.clone());
        self.history.reset(self.buffer.snapshot());
        self
    }

    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history = EditHistory::rooted_at(self.buffer.snapshot(), capacity);
        self
    }

    pub fn with_click_window(mut self, window: Duration) -> Self {
        self.clicks = ClickTracker::new(window);
        self
    }

    pub fn with_clipboard(mut self, clipboard: ClipboardBridge) -> Self {
        self.clipboard = clipboard;
        self
    }

    pub fn with_measure(mut self, measure: Box<dyn TextMeasure>) -> Self {
        self.measure = measure;
        self
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn text(&self) -> &str {
        self.buffer.text()
    }

    pub fn cursor(&self) -> usize {
        self.buffer.cursor()
    }

    pub fn history(&self) -> &EditHistory {
        &self.history
    }

    pub fn drag(&self) -> &DragState {
        &self.drag
    }

    pub fn clipboard_mut(&mut self) -> &mut ClipboardBridge {
        &mut self.clipboard
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Enable or disable keyboard handling. Deactivating also drops any
    /// pointer gesture in progress.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
        if !active {
            self.drag.cancel();
            self.clicks.reset();
            self.selecting = false;
        }
    }

    /// Pure transition for deterministic replay; produced commands are dropped
    pub fn apply_event(mut self, event: InputEvent) -> Self {
        self.handle(event);
        self
    }

    /// Apply one input event, returning the side effect for the host
    pub fn handle(&mut self, event: InputEvent) -> Option<Cmd> {
        let kind = event.kind();
        let before = SessionSnapshot::from_buffer(&self.buffer);

        let cmd = match event {
            InputEvent::Key { key, modifiers } => self.handle_key(key, modifiers),
            InputEvent::Text { text } => {
                if self.active {
                    self.update(TextEditMsg::InsertText(text))
                } else {
                    Cmd::None
                }
            }
            InputEvent::PointerDown {
                x,
                time_ms,
                modifiers,
                window_focused,
            } => self.pointer_down(x, time_ms, modifiers, window_focused),
            InputEvent::PointerMove { x, modifiers } => self.pointer_move(x, modifiers),
            InputEvent::PointerUp { x, modifiers } => self.pointer_up(x, modifiers),
            InputEvent::Activate => {
                self.set_active(true);
                Cmd::None
            }
            InputEvent::Deactivate => {
                self.set_active(false);
                Cmd::None
            }
        };

        if let Some(diff) = before.diff(&SessionSnapshot::from_buffer(&self.buffer)) {
            tracing::trace!(event = kind, "{}", diff);
        }
        debug_assert!(self.buffer.cursor() <= self.buffer.len_chars());

        cmd.into_option()
    }

    /// Apply a keyboard-level editing message.
    /// Returns true if the field changed (needs redraw).
    pub fn apply_msg(&mut self, msg: TextEditMsg) -> bool {
        self.update(msg).needs_redraw()
    }

    fn handle_key(&mut self, key: Key, modifiers: Modifiers) -> Cmd {
        if !self.active {
            tracing::trace!(?key, "ignoring key while inactive");
            return Cmd::None;
        }

        match key_to_msg(key, modifiers) {
            Some(msg) => self.update(msg),
            None => Cmd::None,
        }
    }

    fn update(&mut self, msg: TextEditMsg) -> Cmd {
        // Content edits invalidate a pointer gesture's captured span
        if msg.is_editing() {
            self.drag.cancel();
        }

        match msg {
            // === Movement ===
            TextEditMsg::Move(target) => self.apply_move(target, false),
            TextEditMsg::MoveWithSelection(target) => self.apply_move(target, true),

            // === Insertion ===
            TextEditMsg::InsertChar(ch) => self.edit(|buf| buf.insert_char(ch)),
            TextEditMsg::InsertText(text) => self.edit(|buf| buf.insert(&text)),

            // === Deletion ===
            TextEditMsg::DeleteBackward => self.edit(TextBuffer::delete_backward),
            TextEditMsg::DeleteForward => self.edit(TextBuffer::delete_forward),

            // === Selection ===
            TextEditMsg::SelectAll => self.caret(TextBuffer::select_all),

            // === Clipboard ===
            TextEditMsg::Copy => {
                self.copy();
                Cmd::None
            }
            TextEditMsg::Cut => {
                if !self.copy() {
                    return Cmd::None;
                }
                self.edit(TextBuffer::delete_selection)
            }
            TextEditMsg::Paste => {
                let text = collapse_line_breaks(&self.clipboard.read());
                self.edit(|buf| buf.insert(&text))
            }

            // === History ===
            TextEditMsg::Undo => {
                let snapshot = self.history.undo();
                self.restore_from_history(snapshot)
            }
            TextEditMsg::Redo => {
                let snapshot = self.history.redo();
                self.restore_from_history(snapshot)
            }

            TextEditMsg::Submit => self.submit(),
        }
    }

    fn restore_from_history(&mut self, snapshot: Option<HistorySnapshot>) -> Cmd {
        let Some(snapshot) = snapshot else {
            return Cmd::None;
        };
        self.buffer.restore(&snapshot);
        tracing::debug!(
            target: "history",
            undo = self.history.undo_count(),
            redo = self.history.redo_count(),
            "restored"
        );
        Cmd::Redraw
    }

    fn apply_move(&mut self, target: MoveTarget, extend: bool) -> Cmd {
        self.caret(|buf| match target {
            MoveTarget::Left => buf.move_cursor(-1, extend),
            MoveTarget::Right => buf.move_cursor(1, extend),
            MoveTarget::Start => buf.jump_to(0, extend),
            MoveTarget::End => {
                let len = buf.len_chars();
                buf.jump_to(len, extend)
            }
        })
    }

    /// Run a content-mutating operation and record the result in history
    fn edit(&mut self, op: impl FnOnce(&mut TextBuffer) -> bool) -> Cmd {
        self.history.sync_top(&self.buffer.snapshot());
        if op(&mut self.buffer) {
            self.history.record(self.buffer.snapshot());
            Cmd::Redraw
        } else {
            Cmd::None
        }
    }

    /// Run a caret/selection-only operation; never recorded
    fn caret(&mut self, op: impl FnOnce(&mut TextBuffer)) -> Cmd {
        let before = (self.buffer.cursor(), self.buffer.selection());
        op(&mut self.buffer);
        if before != (self.buffer.cursor(), self.buffer.selection()) {
            Cmd::Redraw
        } else {
            Cmd::None
        }
    }

    /// Copy the selection. Returns false when nothing is selected.
    fn copy(&mut self) -> bool {
        if !self.buffer.has_selection() {
            return false;
        }
        let text = self.buffer.selected_text();
        tracing::debug!(target: "clipboard", len = text.chars().count(), "copy selection");
        self.clipboard.write(&text);
        true
    }

    fn submit(&mut self) -> Cmd {
        let trimmed = self.buffer.text().trim().to_string();

        let cleared = self.edit(TextBuffer::clear);
        if trimmed.is_empty() {
            return cleared;
        }

        tracing::info!(len = trimmed.chars().count(), "submitted input");
        Cmd::Submit(trimmed)
    }

    fn index_at(&self, x: f32) -> usize {
        index_at_x(self.measure.as_ref(), self.buffer.text(), x)
    }

    fn pointer_down(&mut self, x: f32, time_ms: u64, mods: Modifiers, focused: bool) -> Cmd {
        let focus = if focused {
            Cmd::None
        } else {
            Cmd::RequestFocus
        };
        self.active = true;
        self.drag.cancel();

        let index = self.index_at(x);
        let edit = match self.clicks.classify(index, time_ms) {
            ClickKind::Triple => {
                self.selecting = false;
                self.caret(TextBuffer::select_all)
            }
            ClickKind::Double => {
                self.selecting = false;
                self.caret(|buf| {
                    buf.select_word_at(index);
                })
            }
            ClickKind::Single => {
                let selection = self.buffer.selection();
                if !mods.shift() && selection.contains(index) {
                    self.drag.arm(selection.range(), mods.is_copy_drag());
                    Cmd::None
                } else {
                    self.selecting = true;
                    self.caret(|buf| buf.jump_to(index, mods.shift()))
                }
            }
        };

        Cmd::batch(vec![focus, edit])
    }

    fn pointer_move(&mut self, x: f32, mods: Modifiers) -> Cmd {
        let index = self.index_at(x);
        if !self.drag.is_idle() {
            let previous = self.drag.drop_index;
            self.drag.motion(index, mods.is_copy_drag());
            // The host draws the drop caret
            if previous != self.drag.drop_index {
                Cmd::Redraw
            } else {
                Cmd::None
            }
        } else if self.selecting {
            self.caret(|buf| buf.jump_to(index, true))
        } else {
            Cmd::None
        }
    }

    fn pointer_up(&mut self, x: f32, mods: Modifiers) -> Cmd {
        self.selecting = false;
        if self.drag.is_idle() {
            return Cmd::None;
        }

        let index = self.index_at(x);
        self.history.sync_top(&self.buffer.snapshot());
        match self
            .drag
            .release(&mut self.buffer, index, mods.is_copy_drag())
        {
            Some(outcome) => {
                if outcome.is_edit() {
                    self.history.record(self.buffer.snapshot());
                }
                Cmd::Redraw
            }
            None => Cmd::None,
        }
    }
}
