use ratatui::style::{Color, Modifier, Style};

use dockscope_types::Level;

use crate::ui::render::SpanTag;

/// Color theme for the application
pub struct Theme;

impl Theme {
    // Base colors
    pub const FG: Color = Color::White;
    pub const FG_DIM: Color = Color::DarkGray;

    // Accent colors
    pub const PRIMARY: Color = Color::Cyan;
    pub const HIGHLIGHT: Color = Color::Yellow;
    pub const TIME: Color = Color::LightBlue;

    // Log level colors
    pub const LOG_DEBUG: Color = Color::Gray;
    pub const LOG_INFO: Color = Color::Green;
    pub const LOG_WARN: Color = Color::Yellow;
    pub const LOG_ERROR: Color = Color::Red;

    /// Style for a tagged piece of display text
    pub fn style_for(tag: &SpanTag) -> Style {
        match tag {
            SpanTag::Timestamp => Style::default().fg(Self::TIME),
            SpanTag::Level(level) => Self::level(level),
            SpanTag::ErrorDetail => Self::error(),
            SpanTag::Message | SpanTag::Plain => Style::default(),
        }
    }

    /// Style of the bracketed level
    pub fn level(level: &Level) -> Style {
        match level {
            Level::Error => Self::error(),
            Level::Warn => Style::default()
                .fg(Self::LOG_WARN)
                .add_modifier(Modifier::BOLD),
            Level::Info => Style::default().fg(Self::LOG_INFO),
            Level::Debug => Style::default().fg(Self::LOG_DEBUG),
            Level::Other(_) => Style::default(),
        }
    }

    // Text styles
    pub fn title() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn text() -> Style {
        Style::default().fg(Self::FG)
    }

    pub fn text_dim() -> Style {
        Style::default().fg(Self::FG_DIM)
    }

    pub fn loading() -> Style {
        Style::default()
            .fg(Self::HIGHLIGHT)
            .add_modifier(Modifier::BOLD)
    }

    // Status bar
    pub fn status_bar() -> Style {
        Style::default().fg(Self::FG_DIM)
    }

    pub fn status_bar_key() -> Style {
        Style::default()
            .fg(Self::HIGHLIGHT)
            .add_modifier(Modifier::BOLD)
    }

    // Error
    pub fn error() -> Style {
        Style::default()
            .fg(Self::LOG_ERROR)
            .add_modifier(Modifier::BOLD)
    }
}
