//! TUI components for dockscope
//!
//! This crate provides the terminal user interface for dockscope: the pure
//! viewport state machine, the pure display-line renderer, keybindings, event
//! handling, and the ratatui screens built on top of them.

pub mod app;
pub mod config;
pub mod tui;
pub mod ui;

pub use app::{Action, AppState, ViewportState};
pub use config::{KeyBinding, KeyBindings, KeyContext};
pub use tui::{Event, EventHandler, Tui};
pub use ui::components::{HelpOverlay, StatusBar};
pub use ui::render::{DisplayLine, SpanTag, format_timestamp, render_lines, wrap_spans};
pub use ui::screens::LogViewerScreen;
pub use ui::{Layout, Theme};
