//! Multi-click detection for the input field
//!
//! Pointer presses are classified as single, double or triple clicks from
//! their timing and the character index they land on.

use std::time::Duration;

/// Presses further apart than this start a new click sequence
pub const MULTI_CLICK_WINDOW: Duration = Duration::from_millis(450);

/// What a classified press should do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickKind {
    /// Place the caret / start a linear selection / arm a drag
    Single,
    /// Select the word under the pointer
    Double,
    /// Select everything
    Triple,
}

impl ClickKind {
    pub fn from_count(count: u8) -> Self {
        match count {
            2 => ClickKind::Double,
            3 => ClickKind::Triple,
            _ => ClickKind::Single,
        }
    }
}

/// Click tracking state for double/triple click detection
#[derive(Debug, Clone)]
pub struct ClickTracker {
    /// Host timestamp of the previous press, in milliseconds
    pub last_click_time: Option<u64>,
    pub last_click_position: Option<usize>,
    pub click_count: u8,
    window: Duration,
}

impl Default for ClickTracker {
    fn default() -> Self {
        Self::new(MULTI_CLICK_WINDOW)
    }
}

impl ClickTracker {
    pub fn new(window: Duration) -> Self {
        Self {
            last_click_time: None,
            last_click_position: None,
            click_count: 0,
            window,
        }
    }

    /// Update click count based on timing and position
    ///
    /// Returns the new click count (1, 2, or 3). Reaching 3 resets the
    /// sequence, so the next rapid press counts as 1 again.
    pub fn track_click(&mut self, position: usize, time_ms: u64) -> u8 {
        let is_rapid_click = self.last_click_time.is_some_and(|last| {
            let delta = time_ms.saturating_sub(last);
            u128::from(delta) <= self.window.as_millis()
        });
        let is_same_position = self.last_click_position == Some(position);

        if is_rapid_click && is_same_position {
            self.click_count += 1;
        } else {
            self.click_count = 1;
        }

        self.last_click_time = Some(time_ms);
        self.last_click_position = Some(position);

        let count = self.click_count;
        if count >= 3 {
            self.click_count = 0;
        }

        tracing::trace!(target: "click", position, time_ms, count, "classified press");
        count
    }

    /// Classify a press
    pub fn classify(&mut self, position: usize, time_ms: u64) -> ClickKind {
        ClickKind::from_count(self.track_click(position, time_ms))
    }

    /// Reset click tracking (field hidden or deactivated)
    pub fn reset(&mut self) {
        self.last_click_time = None;
        self.last_click_position = None;
        self.click_count = 0;
    }
}
