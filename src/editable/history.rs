//! Edit history (undo/redo) for the input field.
//!
//! The field is at most a few dozen characters long, so history stores full
//! snapshots of the buffer instead of inverse operations.

use std::collections::VecDeque;

/// Default number of snapshots kept on each stack
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// Recorded copy of the buffer content, cursor and selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistorySnapshot {
    pub content: String,
    pub cursor: usize,
    pub anchor: usize,
    pub extent: usize,
}

impl HistorySnapshot {
    /// Snapshot of an empty buffer with the caret at 0
    pub fn empty() -> Self {
        Self::default()
    }

    /// Same text, possibly different caret
    fn same_content(&self, other: &HistorySnapshot) -> bool {
        self.content == other.content
    }
}

/// Edit history with undo/redo stacks.
///
/// The top of `undo` always mirrors the current buffer state; the oldest entry
/// is the state the session started from and is never undone past.
#[derive(Debug, Clone)]
pub struct EditHistory {
    undo_stack: VecDeque<HistorySnapshot>,
    redo_stack: VecDeque<HistorySnapshot>,
    max_size: usize,
}

impl Default for EditHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl EditHistory {
    /// Create a history rooted at the empty state with the default capacity
    pub fn new() -> Self {
        Self::with_max_size(DEFAULT_HISTORY_CAPACITY)
    }

    /// Create a history rooted at the empty state with the given capacity
    pub fn with_max_size(max_size: usize) -> Self {
        Self::rooted_at(HistorySnapshot::empty(), max_size)
    }

    /// Create a history whose initial (never undone) entry is `initial`
    pub fn rooted_at(initial: HistorySnapshot, max_size: usize) -> Self {
        let mut undo_stack = VecDeque::with_capacity(max_size.max(1) + 1);
        undo_stack.push_back(initial);
        Self {
            undo_stack,
            redo_stack: VecDeque::new(),
            max_size: max_size.max(1),
        }
    }

    /// Record the post-edit state.
    ///
    /// Returns false (and keeps redo intact) when the snapshot equals the top.
    pub fn record(&mut self, snapshot: HistorySnapshot) -> bool {
        if self.undo_stack.back() == Some(&snapshot) {
            tracing::trace!(target: "history", "skipping duplicate snapshot");
            return false;
        }

        self.redo_stack.clear();
        self.undo_stack.push_back(snapshot);

        while self.undo_stack.len() > self.max_size {
            self.undo_stack.pop_front();
        }

        tracing::debug!(
            target: "history",
            undo = self.undo_stack.len(),
            "recorded snapshot"
        );
        true
    }

    /// Refresh the caret of the top entry when only the caret moved since it
    /// was recorded, so undo lands exactly on the pre-edit state.
    pub fn sync_top(&mut self, current: &HistorySnapshot) {
        if let Some(top) = self.undo_stack.back_mut() {
            if top.same_content(current) && top != current {
                top.clone_from(current);
            }
        }
    }

    /// Step back one entry. Returns the snapshot to restore.
    pub fn undo(&mut self) -> Option<HistorySnapshot> {
        if self.undo_stack.len() < 2 {
            return None;
        }

        let top = self.undo_stack.pop_back()?;
        self.redo_stack.push_back(top);
        while self.redo_stack.len() > self.max_size {
            self.redo_stack.pop_front();
        }

        let restored = self.undo_stack.back().cloned();
        tracing::debug!(
            target: "history",
            undo = self.undo_stack.len(),
            redo = self.redo_stack.len(),
            "undo"
        );
        restored
    }

    /// Step forward one entry. Returns the snapshot to restore.
    pub fn redo(&mut self) -> Option<HistorySnapshot> {
        let snapshot = self.redo_stack.pop_back()?;
        self.undo_stack.push_back(snapshot.clone());
        while self.undo_stack.len() > self.max_size {
            self.undo_stack.pop_front();
        }

        tracing::debug!(
            target: "history",
            undo = self.undo_stack.len(),
            redo = self.redo_stack.len(),
            "redo"
        );
        Some(snapshot)
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        self.undo_stack.len() >= 2
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Drop all history and start over from `initial`
    pub fn reset(&mut self, initial: HistorySnapshot) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.undo_stack.push_back(initial);
    }

    /// Number of entries in the undo stack (including the current state)
    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    /// Number of entries in the redo stack
    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// The entry mirroring the current state
    pub fn top(&self) -> Option<&HistorySnapshot> {
        self.undo_stack.back()
    }
}
