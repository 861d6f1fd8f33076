//! Debug tracing infrastructure for development diagnostics
//!
//! Provides structured logging with scoped filtering for debugging
//! selection, drag and history transitions.
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=drag=trace,history=debug` - scoped filtering
//! - `RUST_LOG=overlay_input::session=trace` - module-level filtering
//!
//! Targets: `selection`, `history`, `drag`, `clipboard`, `click`.
//!
//! # Log Files
//!
//! Logs are written to `<config_dir>/logs/overlay-input.log` with daily rotation.
//! File logging uses debug level by default for more verbose troubleshooting.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::editable::TextBuffer;

/// Name of the rolling log file inside the logs directory
pub const LOG_FILE_NAME: &str = "overlay-input.log";

/// Initialize tracing subscriber with console and file logging
///
/// Console output respects RUST_LOG (default `warn`). File logging writes to
/// `<config_dir>/logs/overlay-input.log` with daily rotation.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    // File layer - always debug level for troubleshooting
    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, LOG_FILE_NAME);
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {:#}", e);
            None
        }
    };

    // try_init so repeated initialization (tests, embedding hosts) is harmless
    let _ = tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init();
}

/// Lightweight snapshot of the field's caret state for diffing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub len: usize,
    pub cursor: usize,
    pub anchor: usize,
    pub extent: usize,
}

impl SessionSnapshot {
    pub fn from_buffer(buffer: &TextBuffer) -> Self {
        let selection = buffer.selection();
        Self {
            len: buffer.len_chars(),
            cursor: buffer.cursor(),
            anchor: selection.anchor,
            extent: selection.extent,
        }
    }

    fn selection_empty(&self) -> bool {
        self.anchor == self.extent
    }

    /// Generate a diff description between two snapshots
    pub fn diff(&self, other: &SessionSnapshot) -> Option<String> {
        let mut changes = Vec::new();

        if self.len != other.len {
            changes.push(format!("len: {} → {}", self.len, other.len));
        }
        if self.cursor != other.cursor {
            changes.push(format!("cursor: {} → {}", self.cursor, other.cursor));
        }
        if self.anchor != other.anchor || self.extent != other.extent {
            if other.selection_empty() && !self.selection_empty() {
                changes.push("selection cleared".to_string());
            } else if !other.selection_empty() {
                changes.push(format!(
                    "selection: {}..{} → {}..{}",
                    self.anchor, self.extent, other.anchor, other.extent
                ));
            }
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}
