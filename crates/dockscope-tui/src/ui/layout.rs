use ratatui::layout::{Constraint, Direction, Layout as RatatuiLayout, Rect};

/// Layout helper for consistent screen layouts
pub struct Layout;

impl Layout {
    /// Split the log viewer into header, logs and footer.
    ///
    /// Header and footer take three rows together, matching
    /// [`ViewportState::log_rows`](crate::app::ViewportState::log_rows).
    pub fn log_viewer(area: Rect) -> (Rect, Rect, Rect) {
        let chunks = RatatuiLayout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Header
                Constraint::Min(0),    // Logs
                Constraint::Length(2), // Footer
            ])
            .split(area);

        (chunks[0], chunks[1], chunks[2])
    }

    /// Center a popup of at most `width` x `height` inside `area`
    pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
        let width = width.min(area.width.saturating_sub(4));
        let height = height.min(area.height.saturating_sub(4));
        let x = area.x + area.width.saturating_sub(width) / 2;
        let y = area.y + area.height.saturating_sub(height) / 2;
        Rect::new(x, y, width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_viewer_leaves_three_rows_of_chrome() {
        let (header, logs, footer) = Layout::log_viewer(Rect::new(0, 0, 80, 24));
        assert_eq!(header.height, 1);
        assert_eq!(logs.height, 21);
        assert_eq!(footer.height, 2);
        assert_eq!(footer.y, 22);
    }

    #[test]
    fn test_centered_fits_inside() {
        let popup = Layout::centered(Rect::new(0, 0, 40, 10), 50, 24);
        assert_eq!((popup.width, popup.height), (36, 6));
        assert_eq!((popup.x, popup.y), (2, 2));
    }
}
