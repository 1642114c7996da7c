use std::ops::Range;

/// Scroll position of the transcript, counted in lines back from the bottom.
///
/// Zero follows the tail, so new output stays visible until the user scrolls.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TranscriptState {
    scroll_back: usize,
}

impl TranscriptState {
    pub fn scroll_back(&self) -> usize {
        self.scroll_back
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll_back = self.scroll_back.saturating_add(lines);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll_back = self.scroll_back.saturating_sub(lines);
    }

    pub fn follow(&mut self) {
        self.scroll_back = 0;
    }

    /// Visible line range for `total` lines in a viewport of `height` rows.
    /// Clamps the stored offset so scrolling past the top is not remembered.
    pub fn window(&mut self, total: usize, height: usize) -> Range<usize> {
        let max_back = total.saturating_sub(height);
        self.scroll_back = self.scroll_back.min(max_back);
        let end = total - self.scroll_back;
        end.saturating_sub(height)..end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn follows_tail_by_default() {
        let mut state = TranscriptState::default();
        assert_eq!(state.window(30, 10), 20..30);
        assert_eq!(state.window(5, 10), 0..5);
    }

    #[test]
    fn scrolling_moves_the_window_and_clamps() {
        let mut state = TranscriptState::default();
        state.scroll_up(4);
        assert_eq!(state.window(30, 10), 16..26);

        state.scroll_up(100);
        assert_eq!(state.window(30, 10), 0..10);
        assert_eq!(state.scroll_back(), 20);

        state.scroll_down(25);
        assert_eq!(state.window(30, 10), 20..30);
    }

    #[test]
    fn zero_height_viewport_is_empty() {
        let mut state = TranscriptState::default();
        assert!(state.window(12, 0).is_empty());
    }
}
