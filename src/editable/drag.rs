//! Drag-and-drop reordering of a selection inside the input field.
//!
//! The pointer picks up the current selection (`Armed`), motion turns that
//! into a drag (`Dragging`), and release drops the text at the last computed
//! index, either moving it or (with the copy modifier) duplicating it.

use std::ops::Range;

use super::state::TextBuffer;

/// Phase of the drag state machine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DragPhase {
    #[default]
    Idle,
    /// Pointer pressed inside the selection, no motion yet
    Armed,
    /// Pointer moved while armed; drop index is live
    Dragging,
}

/// What a release did to the buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// Drop landed inside the dragged span, or the move left the text as it
    /// was; only the caret moved
    Collapsed { index: usize },
    /// Text was moved to a new position
    Moved { text: String, inserted_at: usize },
    /// Text was duplicated at the drop position
    Copied { text: String, inserted_at: usize },
}

impl DropOutcome {
    /// Whether the drop changed the content (and therefore needs a history entry)
    pub fn is_edit(&self) -> bool {
        !matches!(self, DropOutcome::Collapsed { .. })
    }
}

/// Drag state for one input field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragState {
    pub phase: DragPhase,
    /// Selection span captured at press time; frozen for the whole gesture
    pub source_range: Range<usize>,
    /// Sampled from the copy modifier on every pointer event
    pub copy_mode: bool,
    /// Insertion index while dragging
    pub drop_index: Option<usize>,
}

impl DragState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_idle(&self) -> bool {
        self.phase == DragPhase::Idle
    }

    pub fn is_dragging(&self) -> bool {
        self.phase == DragPhase::Dragging
    }

    /// Idle -> Armed: capture the selection being picked up
    pub fn arm(&mut self, source_range: Range<usize>, copy_mode: bool) {
        tracing::debug!(target: "drag", ?source_range, copy_mode, "armed");
        self.phase = DragPhase::Armed;
        self.source_range = source_range;
        self.copy_mode = copy_mode;
        self.drop_index = None;
    }

    /// Armed -> Dragging on first motion; Dragging updates the drop index.
    /// Ignored while idle.
    pub fn motion(&mut self, index: usize, copy_mode: bool) {
        match self.phase {
            DragPhase::Idle => return,
            DragPhase::Armed => {
                tracing::debug!(target: "drag", index, "drag started");
                self.phase = DragPhase::Dragging;
            }
            DragPhase::Dragging => {}
        }
        self.drop_index = Some(index);
        self.copy_mode = copy_mode;
        tracing::trace!(target: "drag", index, copy_mode, "drop index");
    }

    /// Back to idle without touching the buffer
    pub fn cancel(&mut self) {
        if !self.is_idle() {
            tracing::debug!(target: "drag", "cancelled");
        }
        *self = Self::default();
    }

    /// Finish the gesture. Returns the drop outcome when a drag was in
    /// progress; an armed press released without motion just collapses the
    /// caret at `release_index`.
    pub fn release(
        &mut self,
        buffer: &mut TextBuffer,
        release_index: usize,
        copy_mode: bool,
    ) -> Option<DropOutcome> {
        let phase = self.phase;
        let source = self.source_range.clone();
        let drop_index = self.drop_index;
        self.cancel();

        match phase {
            DragPhase::Idle => None,
            DragPhase::Armed => {
                buffer.jump_to(release_index, false);
                Some(DropOutcome::Collapsed {
                    index: buffer.cursor(),
                })
            }
            DragPhase::Dragging => {
                let drop = drop_index.unwrap_or(release_index);
                Some(commit_drop(buffer, source, drop, copy_mode))
            }
        }
    }
}

/// Drop the text of `source` at `drop_index`.
///
/// `drop_index` is an index into the buffer as it looks before the drop. In
/// move mode the source span is removed first, so a drop after the span is
/// shifted back by the span length.
pub fn commit_drop(
    buffer: &mut TextBuffer,
    source: Range<usize>,
    drop_index: usize,
    copy_mode: bool,
) -> DropOutcome {
    let len = buffer.len_chars();
    let start = source.start.min(source.end).min(len);
    let end = source.start.max(source.end).min(len);
    let drop = drop_index.min(len);

    if !copy_mode && start <= drop && drop <= end {
        buffer.jump_to(drop, false);
        tracing::debug!(target: "drag", drop, "dropped onto itself");
        return DropOutcome::Collapsed { index: drop };
    }

    let text = buffer.text().chars().skip(start).take(end - start).collect::<String>();

    if copy_mode {
        let inserted = buffer.insert_at(drop, &text);
        buffer.jump_to(drop + inserted, false);
        tracing::debug!(target: "drag", drop, inserted, "copied");
        return DropOutcome::Copied {
            text: text.chars().take(inserted).collect(),
            inserted_at: drop,
        };
    }

    let before = buffer.text().to_string();
    buffer.remove_range(start..end);
    let target = if drop > start { drop - (end - start) } else { drop };
    let inserted = buffer.insert_at(target, &text);
    buffer.jump_to(target + inserted, false);

    // Moving a run of identical characters past itself
    if buffer.text() == before {
        tracing::debug!(target: "drag", drop, "move left text unchanged");
        return DropOutcome::Collapsed {
            index: buffer.cursor(),
        };
    }
    tracing::debug!(target: "drag", from = start, to = target, "moved");

    DropOutcome::Moved {
        text,
        inserted_at: target,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editable::EditConstraints;

    fn buffer(text: &str) -> TextBuffer {
        TextBuffer::with_text(text, EditConstraints::chat_input())
    }

    #[test]
    fn test_move_forward_adjusts_drop() {
        let mut buf = buffer("abcdef");
        let outcome = commit_drop(&mut buf, 0..3, 5, false);
        assert_eq!(buf.text(), "deabcf");
        assert_eq!(buf.cursor(), 5);
        assert_eq!(
            outcome,
            DropOutcome::Moved {
                text: "abc".to_string(),
                inserted_at: 2
            }
        );
    }

    #[test]
    fn test_move_backward() {
        let mut buf = buffer("abcdef");
        commit_drop(&mut buf, 3..5, 1, false);
        assert_eq!(buf.text(), "adebcf");
        assert_eq!(buf.cursor(), 3);
    }

    #[test]
    fn test_move_to_end() {
        let mut buf = buffer("abcdef");
        commit_drop(&mut buf, 0..2, 6, false);
        assert_eq!(buf.text(), "cdefab");
        assert_eq!(buf.cursor(), 6);
    }

    #[test]
    fn test_drop_inside_source_is_noop() {
        let mut buf = buffer("abcdef");
        buf.select_range(1, 4);
        let outcome = commit_drop(&mut buf, 1..4, 2, false);
        assert_eq!(buf.text(), "abcdef");
        assert_eq!(buf.cursor(), 2);
        assert!(!buf.has_selection());
        assert!(!outcome.is_edit());
    }

    #[test]
    fn test_drop_on_source_edges_is_noop() {
        let mut buf = buffer("abcdef");
        commit_drop(&mut buf, 1..4, 4, false);
        assert_eq!(buf.text(), "abcdef");
        assert_eq!(buf.cursor(), 4);
    }

    #[test]
    fn test_move_that_keeps_text_collapses() {
        let mut buf = buffer("aab");
        buf.select_range(0, 1);
        let outcome = commit_drop(&mut buf, 0..1, 2, false);
        assert_eq!(buf.text(), "aab");
        assert_eq!(buf.cursor(), 2);
        assert!(!buf.has_selection());
        assert_eq!(outcome, DropOutcome::Collapsed { index: 2 });
    }

    #[test]
    fn test_copy_inside_source_duplicates() {
        let mut buf = buffer("abcdef");
        let outcome = commit_drop(&mut buf, 1..4, 2, true);
        assert_eq!(buf.text(), "abbcdcdef");
        assert_eq!(buf.cursor(), 5);
        assert!(outcome.is_edit());
    }

    #[test]
    fn test_copy_truncates_to_capacity() {
        let mut buf = TextBuffer::with_text("abcdef", EditConstraints::with_max_length(8));
        let outcome = commit_drop(&mut buf, 0..3, 6, true);
        assert_eq!(buf.text(), "abcdefab");
        assert_eq!(buf.cursor(), 8);
        assert_eq!(
            outcome,
            DropOutcome::Copied {
                text: "ab".to_string(),
                inserted_at: 6
            }
        );
    }

    #[test]
    fn test_reversed_source_range() {
        let mut buf = buffer("abcdef");
        commit_drop(&mut buf, 3..0, 5, false);
        assert_eq!(buf.text(), "deabcf");
    }

    #[test]
    fn test_state_machine_transitions() {
        let mut buf = buffer("abcdef");
        let mut drag = DragState::new();

        drag.motion(4, false);
        assert!(drag.is_idle());

        drag.arm(0..3, false);
        assert_eq!(drag.phase, DragPhase::Armed);
        assert_eq!(drag.drop_index, None);

        drag.motion(4, false);
        assert_eq!(drag.phase, DragPhase::Dragging);
        drag.motion(5, true);
        assert_eq!(drag.drop_index, Some(5));
        assert!(drag.copy_mode);

        let outcome = drag.release(&mut buf, 5, false);
        assert!(matches!(outcome, Some(DropOutcome::Moved { .. })));
        assert_eq!(buf.text(), "deabcf");
        assert!(drag.is_idle());
        assert_eq!(drag.drop_index, None);
        assert_eq!(drag.source_range, 0..0);
    }

    #[test]
    fn test_release_while_armed_collapses() {
        let mut buf = buffer("abcdef");
        buf.select_range(0, 3);
        let mut drag = DragState::new();
        drag.arm(0..3, false);

        let outcome = drag.release(&mut buf, 1, false);
        assert_eq!(outcome, Some(DropOutcome::Collapsed { index: 1 }));
        assert_eq!(buf.text(), "abcdef");
        assert!(!buf.has_selection());
        assert_eq!(buf.cursor(), 1);
    }

    #[test]
    fn test_release_while_idle_does_nothing() {
        let mut buf = buffer("abc");
        let mut drag = DragState::new();
        assert_eq!(drag.release(&mut buf, 1, false), None);
        assert_eq!(buf.cursor(), 3);
    }
}
