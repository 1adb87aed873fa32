//! Viewport state machine
//!
//! Every transition is a pure function of the previous state, the action and
//! the length of the currently visible (filtered) record sequence. Nothing in
//! here touches the terminal.

use std::ops::Range;

use dockscope_logs::RecordFilter;

use crate::app::Action;

/// Rows taken by the header (1) and footer (2)
pub const CHROME_ROWS: usize = 3;

/// Extra rows the "end" key scrolls past the last full page
pub const END_OVERSCROLL: usize = 5;

/// Scroll position, filters and terminal size of the log view
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewportState {
    /// Index of the first visible record in the filtered sequence
    pub scroll_offset: usize,

    /// Show only error-like records
    pub filter_errors_only: bool,

    /// Word-wrap long lines
    pub wrap_enabled: bool,

    pub width: u16,
    pub height: u16,
}

impl ViewportState {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            scroll_offset: 0,
            filter_errors_only: false,
            wrap_enabled: true,
            width,
            height,
        }
    }

    pub fn with_errors_only(mut self, errors_only: bool) -> Self {
        self.filter_errors_only = errors_only;
        self
    }

    pub fn with_wrap(mut self, wrap: bool) -> Self {
        self.wrap_enabled = wrap;
        self
    }

    /// Filter selected by the errors-only toggle
    pub fn filter(&self) -> RecordFilter {
        RecordFilter::from_errors_only(self.filter_errors_only)
    }

    /// Rows available for log lines
    pub fn log_rows(&self) -> usize {
        (self.height as usize).saturating_sub(CHROME_ROWS)
    }

    /// Range of filtered record indices to show for `visible_len` records
    pub fn visible_range(&self, visible_len: usize) -> Range<usize> {
        visible_range(self.scroll_offset, visible_len, self.log_rows())
    }
}

impl Default for ViewportState {
    fn default() -> Self {
        Self::new(80, 24)
    }
}

/// Apply a user action to the viewport
pub fn transition(state: &ViewportState, action: &Action, visible_len: usize) -> ViewportState {
    let mut next = *state;
    let page = state.height as usize;

    match action {
        Action::ScrollUp => next.scroll_offset = state.scroll_offset.saturating_sub(1),
        Action::ScrollDown => next.scroll_offset = state.scroll_offset.saturating_add(1),
        Action::ScrollToTop => next.scroll_offset = 0,
        Action::ScrollToBottom => next.scroll_offset = end_offset(visible_len, state.height),
        Action::PageUp => next.scroll_offset = state.scroll_offset.saturating_sub(page),
        Action::PageDown => next.scroll_offset = state.scroll_offset.saturating_add(page),
        Action::ToggleWrap => next.wrap_enabled = !state.wrap_enabled,
        Action::ToggleErrorsOnly => next.filter_errors_only = !state.filter_errors_only,
        Action::Resize(width, height) => {
            next.width = *width;
            next.height = *height;
        }
        Action::ToggleHelp | Action::CloseHelp | Action::Quit => {}
    }

    next
}

/// Auto-follow policy applied when a record arrives.
///
/// Snaps to the tail whenever the visible set overflows the log area, even if
/// the user scrolled away.
pub fn follow_tail(state: &ViewportState, visible_len: usize) -> ViewportState {
    let mut next = *state;
    let rows = state.log_rows();
    if visible_len > rows {
        next.scroll_offset = visible_len - rows;
    }
    next
}

/// Offset selected by the "end" key.
///
/// Deliberately lands a few rows past the last full page.
pub fn end_offset(visible_len: usize, height: u16) -> usize {
    (visible_len + END_OVERSCROLL).saturating_sub(height as usize)
}

/// Clamp a scroll offset into a window of at most `rows` records
pub fn visible_range(offset: usize, len: usize, rows: usize) -> Range<usize> {
    let start = offset.min(len.saturating_sub(rows));
    let end = (start + rows).min(len);
    start..end
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn viewport(height: u16) -> ViewportState {
        ViewportState::new(80, height)
    }

    #[test]
    fn test_scroll_up_stops_at_zero() {
        let state = transition(&viewport(20), &Action::ScrollUp, 100);
        assert_eq!(state.scroll_offset, 0);
    }

    #[test]
    fn test_scroll_down_is_unbounded() {
        let mut state = viewport(20);
        for _ in 0..5 {
            state = transition(&state, &Action::ScrollDown, 2);
        }
        assert_eq!(state.scroll_offset, 5);
        // Rendering clamps instead
        assert_eq!(state.visible_range(2), 0..2);
    }

    #[test]
    fn test_paging() {
        let mut state = viewport(20);
        state = transition(&state, &Action::PageDown, 100);
        assert_eq!(state.scroll_offset, 20);
        state = transition(&state, &Action::ScrollDown, 100);
        state = transition(&state, &Action::PageUp, 100);
        assert_eq!(state.scroll_offset, 1);
        state = transition(&state, &Action::PageUp, 100);
        assert_eq!(state.scroll_offset, 0);
    }

    #[test]
    fn test_home_and_end() {
        let mut state = viewport(20);
        state = transition(&state, &Action::ScrollToBottom, 100);
        assert_eq!(state.scroll_offset, 85);
        state = transition(&state, &Action::ScrollToTop, 100);
        assert_eq!(state.scroll_offset, 0);

        // Short buffers never go negative
        state = transition(&state, &Action::ScrollToBottom, 3);
        assert_eq!(state.scroll_offset, 0);
    }

    #[test]
    fn test_toggles_keep_offset() {
        let mut state = viewport(20);
        state.scroll_offset = 7;
        let state = transition(&state, &Action::ToggleWrap, 100);
        assert!(!state.wrap_enabled);
        let state = transition(&state, &Action::ToggleErrorsOnly, 100);
        assert!(state.filter_errors_only);
        assert_eq!(state.filter(), RecordFilter::ErrorsOnly);
        assert_eq!(state.scroll_offset, 7);
    }

    #[test]
    fn test_resize_keeps_offset() {
        let mut state = viewport(20);
        state.scroll_offset = 4;
        let state = transition(&state, &Action::Resize(120, 40), 100);
        assert_eq!((state.width, state.height), (120, 40));
        assert_eq!(state.scroll_offset, 4);
    }

    #[test]
    fn test_transition_is_deterministic() {
        let state = viewport(30);
        let a = transition(&state, &Action::PageDown, 10);
        let b = transition(&state, &Action::PageDown, 10);
        assert_eq!(a, b);
    }

    #[test]
    fn test_follow_tail() {
        let state = viewport(10);
        assert_eq!(follow_tail(&state, 7).scroll_offset, 0);
        assert_eq!(follow_tail(&state, 8).scroll_offset, 1);

        // Re-engages after manual scrolling
        let mut scrolled = follow_tail(&state, 50);
        scrolled = transition(&scrolled, &Action::ScrollToTop, 50);
        assert_eq!(follow_tail(&scrolled, 51).scroll_offset, 44);
    }

    #[test]
    fn test_small_buffer_shows_everything() {
        let mut state = viewport(10);
        state.scroll_offset = 6;
        assert_eq!(state.visible_range(3), 0..3);
    }

    #[test]
    fn test_tiny_terminal_shows_nothing() {
        let state = viewport(2);
        assert_eq!(state.log_rows(), 0);
        assert!(state.visible_range(10).is_empty());
    }

    proptest! {
        #[test]
        fn end_offset_never_exceeds_overscroll(len in 0usize..10_000, height in 0u16..200) {
            let state = transition(&viewport(height), &Action::ScrollToBottom, len);
            let rows = (height as usize).saturating_sub(CHROME_ROWS);
            prop_assert!(state.scroll_offset <= len.saturating_sub(rows) + END_OVERSCROLL);
        }

        #[test]
        fn visible_range_stays_in_bounds(offset in 0usize..10_000, len in 0usize..10_000, rows in 0usize..200) {
            let range = visible_range(offset, len, rows);
            prop_assert!(range.start <= range.end);
            prop_assert!(range.end <= len);
            prop_assert!(range.len() <= rows);
            prop_assert_eq!(range.len(), rows.min(len));
        }
    }
}
