//! Message types for the input field's keyboard-driven operations.

/// Target for cursor movement operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveTarget {
    /// Move one character left
    Left,
    /// Move one character right
    Right,
    /// Move to start of field
    Start,
    /// Move to end of field
    End,
}

/// Unified message type for all text editing operations.
#[derive(Debug, Clone, PartialEq)]
pub enum TextEditMsg {
    // === Movement ===
    /// Move cursor without affecting selection
    Move(MoveTarget),
    /// Move cursor and extend selection
    MoveWithSelection(MoveTarget),

    // === Insertion ===
    /// Insert a single character
    InsertChar(char),
    /// Insert a string
    InsertText(String),

    // === Deletion ===
    /// Delete character before cursor (Backspace)
    DeleteBackward,
    /// Delete character after cursor (Delete)
    DeleteForward,

    // === Selection ===
    /// Select all text
    SelectAll,

    // === Clipboard ===
    /// Copy selection to clipboard
    Copy,
    /// Cut selection to clipboard
    Cut,
    /// Paste text from clipboard
    Paste,

    // === Undo/Redo ===
    /// Undo last edit
    Undo,
    /// Redo last undone edit
    Redo,

    /// Commit the field content (Enter)
    Submit,
}

impl TextEditMsg {
    /// Check if this message may modify the buffer content
    pub fn is_editing(&self) -> bool {
        matches!(
            self,
            TextEditMsg::InsertChar(_)
                | TextEditMsg::InsertText(_)
                | TextEditMsg::DeleteBackward
                | TextEditMsg::DeleteForward
                | TextEditMsg::Cut
                | TextEditMsg::Paste
                | TextEditMsg::Undo
                | TextEditMsg::Redo
                | TextEditMsg::Submit
        )
    }
}
