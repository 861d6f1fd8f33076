//! Inline text editing for the overlay's chat input.
//!
//! This module holds the pure editing model; it never touches pixels or the
//! platform. The session layer ([`crate::session`]) drives it from input events.
//!
//! # Architecture
//!
//! - [`StringBuffer`]: char-indexed text storage
//! - [`TextBuffer`]: text plus cursor and selection, with all mutation operations
//! - [`EditHistory`]: bounded snapshot-based undo/redo
//! - [`EditConstraints`]: capacity and character filter
//! - [`DragState`]: pick-up-and-drop reordering of the selection
//! - [`TextEditMsg`]: keyboard-level editing operations
//!
//! # Example
//!
//! ```ignore
//! use overlay_input::editable::{EditConstraints, TextBuffer};
//!
//! let mut buffer = TextBuffer::new(EditConstraints::chat_input());
//! buffer.insert("hello");
//! buffer.move_cursor(-2, true);
//!
//! assert_eq!(buffer.selected_text(), "lo");
//! ```

mod buffer;
mod constraints;
pub mod drag;
mod history;
mod messages;
mod selection;
mod state;

// Re-export main types
pub use buffer::StringBuffer;
pub use constraints::{CharFilter, EditConstraints, DEFAULT_MAX_LENGTH};
pub use drag::{commit_drop, DragPhase, DragState, DropOutcome};
pub use history::{EditHistory, HistorySnapshot, DEFAULT_HISTORY_CAPACITY};
pub use messages::{MoveTarget, TextEditMsg};
pub use selection::Selection;
pub use state::TextBuffer;
