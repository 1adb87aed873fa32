use chrono::Local;
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span, Text},
    widgets::{Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
};

use crate::app::AppState;
use crate::ui::components::{HelpOverlay, StatusBar, level_counts_text, viewer_hints};
use crate::ui::render::{DisplayLine, TIME_FORMAT, render_view};
use crate::ui::{Layout, Theme};

/// Characters of the target shown in the header
const TARGET_PREFIX_LEN: usize = 12;

const QUIT_HINT: &str = "Press 'q' or Ctrl+C to quit";

/// Log viewer screen
pub struct LogViewerScreen;

impl LogViewerScreen {
    pub fn render(frame: &mut Frame, state: &AppState) {
        let area = frame.area();

        if let Some(error) = &state.fatal {
            let text = Text::from(vec![
                Line::from(format!("Error: {error}")),
                Line::from(""),
                Line::from(QUIT_HINT),
            ]);
            frame.render_widget(Paragraph::new(text).style(Theme::error()), area);
            return;
        }

        if !state.ready {
            let text = Text::from(vec![
                Line::from("Loading logs..."),
                Line::from(""),
                Line::from(QUIT_HINT),
            ]);
            frame.render_widget(Paragraph::new(text).style(Theme::loading()), area);
            return;
        }

        let (header, logs, footer) = Layout::log_viewer(area);

        frame.render_widget(
            Paragraph::new(Span::styled(header_text(state), Theme::title())),
            header,
        );
        Self::render_logs(frame, logs, state);
        Self::render_footer(frame, footer, state);

        if state.help_visible {
            HelpOverlay::render(frame);
        }
    }

    fn render_logs(frame: &mut Frame, area: Rect, state: &AppState) {
        let now = Local::now().format(TIME_FORMAT).to_string();
        let lines: Vec<Line> = render_view(&state.buffer, &state.viewport, &now)
            .into_iter()
            .map(styled_line)
            .collect();

        frame.render_widget(Paragraph::new(lines), area);

        let visible = state.visible_len();
        let rows = state.viewport.log_rows();
        if visible > rows {
            let max_scroll = visible - rows;
            let mut scrollbar_state = ScrollbarState::default()
                .content_length(max_scroll)
                .position(state.viewport.scroll_offset.min(max_scroll));
            let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(None)
                .end_symbol(None);

            frame.render_stateful_widget(scrollbar, area, &mut scrollbar_state);
        }
    }

    fn render_footer(frame: &mut Frame, area: Rect, state: &AppState) {
        let status_area = Rect { height: 1, ..area };
        frame.render_widget(
            Paragraph::new(Span::styled(footer_status(state), Theme::text_dim())),
            status_area,
        );

        if area.height < 2 {
            return;
        }
        let bar_area = Rect {
            y: area.y + 1,
            height: 1,
            ..area
        };

        let mut right = level_counts_text(state.buffer.level_counts());
        if let Some(info) = &state.info {
            right = format!("{info} | {right}");
        }
        frame.render_widget(StatusBar::new().hints(viewer_hints()).right(right), bar_area);
    }
}

fn styled_line(line: DisplayLine) -> Line<'static> {
    Line::from(
        line.spans
            .into_iter()
            .map(|(tag, text)| Span::styled(text, Theme::style_for(&tag)))
            .collect::<Vec<_>>(),
    )
}

/// `Container logs: <target> | Requested: <tail> | Loaded: <n> logs`
pub fn header_text(state: &AppState) -> String {
    let target: String = state.target.chars().take(TARGET_PREFIX_LEN).collect();
    format!(
        "Container logs: {} | Requested: {} | Loaded: {} logs",
        target,
        state.requested_tail,
        state.buffer.len()
    )
}

/// Quit hint followed by the toggle and scroll status
pub fn footer_status(state: &AppState) -> String {
    let viewport = &state.viewport;
    let on_off = |on: bool| if on { "ON" } else { "OFF" };

    let mut status = format!(
        "{QUIT_HINT} | Word wrap: {} (press 'w' to toggle) | Error filter: {} (press 'e' to toggle)",
        on_off(viewport.wrap_enabled),
        on_off(viewport.filter_errors_only),
    );

    let visible = state.visible_len();
    if visible > viewport.log_rows() {
        status.push_str(&format!(
            " | Scroll: {}/{} (↑↓ j/k pgup/pgdn home/end)",
            viewport.scroll_offset + 1,
            visible
        ));
    }
    status
}
