//! Overlay Input - inline text editing for the overlay's chat box
//!
//! This crate provides the single-line editing engine (buffer, selection,
//! history, multi-click, drag reordering, clipboard) and the session that
//! drives it from host input events.

pub mod cli;
pub mod clipboard;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod editable;
pub mod host;
pub mod keymap;
pub mod measure;
pub mod mouse;
pub mod replay;
pub mod session;
pub mod tracing;
pub mod util;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::InputConfig;
pub use editable::{TextBuffer, TextEditMsg};
pub use session::{EditSession, InputEvent};
