use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};
use unicode_width::UnicodeWidthStr;

use dockscope_types::LevelCounts;

use crate::ui::Theme;

/// Status bar with keyboard hints on the left and free text on the right
pub struct StatusBar<'a> {
    hints: Vec<(&'a str, &'a str)>,
    right_text: Option<String>,
}

impl<'a> StatusBar<'a> {
    pub fn new() -> Self {
        Self {
            hints: Vec::new(),
            right_text: None,
        }
    }

    /// Add keyboard hints as (key, description) pairs
    pub fn hints<I>(mut self, hints: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        self.hints = hints.into_iter().collect();
        self
    }

    /// Set text to display on the right side
    pub fn right<S: Into<String>>(mut self, text: S) -> Self {
        self.right_text = Some(text.into());
        self
    }
}

impl Default for StatusBar<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Theme::status_bar());

        let mut spans = Vec::new();
        for (i, (key, desc)) in self.hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled("  ", Theme::status_bar()));
            }
            spans.push(Span::styled(format!("[{key}]"), Theme::status_bar_key()));
            spans.push(Span::styled(format!(" {desc}"), Theme::status_bar()));
        }

        let line = Line::from(spans);
        let line_width = line.width() as u16;

        buf.set_line(area.x, area.y, &line, area.width);

        // Right text only when it does not collide with the hints
        if let Some(right) = self.right_text {
            let right_width = right.width() as u16;
            let right_x = area.x + area.width.saturating_sub(right_width + 1);
            if right_x > area.x + line_width + 1 {
                buf.set_stringn(right_x, area.y, &right, right_width as usize, Theme::status_bar());
            }
        }
    }
}

/// Hints shown under the log view
pub fn viewer_hints() -> Vec<(&'static str, &'static str)> {
    vec![("?", "Help"), ("w", "Wrap"), ("e", "Errors"), ("q", "Quit")]
}

/// Compact per-level counts, e.g. `E:1 W:0 I:12 D:3 | 16 logs`
pub fn level_counts_text(counts: &LevelCounts) -> String {
    let mut text = format!(
        "E:{} W:{} I:{} D:{}",
        counts.error, counts.warn, counts.info, counts.debug
    );
    if counts.other > 0 {
        text.push_str(&format!(" ?:{}", counts.other));
    }
    text.push_str(&format!(" | {} logs", counts.total()));
    text
}
