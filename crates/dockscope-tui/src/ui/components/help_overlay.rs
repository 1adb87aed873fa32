use ratatui::{
    Frame,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::ui::{Layout, Theme};

/// Key bindings listed in the overlay, grouped by section
const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Navigation",
        &[
            ("j/↓", "Scroll down"),
            ("k/↑", "Scroll up"),
            ("PgDn", "Page down"),
            ("PgUp", "Page up"),
            ("g/Home", "Go to top"),
            ("G/End", "Go to bottom"),
        ],
    ),
    (
        "Display",
        &[
            ("w", "Toggle word wrap"),
            ("e", "Toggle error filter"),
        ],
    ),
    (
        "General",
        &[
            ("?", "Toggle this help"),
            ("Esc", "Close help"),
            ("q/Ctrl+c", "Quit"),
        ],
    ),
];

/// Help overlay showing keybindings
pub struct HelpOverlay;

impl HelpOverlay {
    pub fn render(frame: &mut Frame) {
        let lines = Self::lines();
        let height = lines.len() as u16 + 2;
        let popup_area = Layout::centered(frame.area(), 44, height);

        // Clear the background
        frame.render_widget(Clear, popup_area);

        let help_widget = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Theme::PRIMARY))
                .title(Span::styled(" Help ", Theme::title())),
        );

        frame.render_widget(help_widget, popup_area);
    }

    fn lines() -> Vec<Line<'static>> {
        let mut lines = vec![
            Line::from(Span::styled(
                "Keybindings",
                Style::default().add_modifier(Modifier::BOLD),
            )),
        ];

        for (title, keys) in SECTIONS {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                *title,
                Style::default().fg(Theme::HIGHLIGHT),
            )));
            lines.extend(keys.iter().map(|(key, desc)| Self::key_line(*key, *desc)));
        }

        lines
    }

    fn key_line(key: &'static str, desc: &'static str) -> Line<'static> {
        Line::from(vec![
            Span::styled(format!("  {key:>8}"), Style::default().fg(Theme::LOG_INFO)),
            Span::styled(format!("  {desc}"), Theme::text()),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_every_viewer_key() {
        let text: Vec<String> = HelpOverlay::lines()
            .iter()
            .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect();
        let joined = text.join("\n");
        for key in ["j/↓", "PgUp", "G/End", "w", "e", "q/Ctrl+c"] {
            assert!(joined.contains(key), "missing {key}");
        }
    }
}
