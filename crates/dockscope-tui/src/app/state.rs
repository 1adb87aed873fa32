use dockscope_logs::{PumpEvent, RecordBuffer, SourceError};
use tracing::{debug, warn};

use crate::app::Action;
use crate::app::viewport::{ViewportState, follow_tail, transition};

/// State of one viewer session.
///
/// Owned exclusively by the render loop; the pump only talks to it through
/// [`PumpEvent`]s.
pub struct AppState {
    /// Every record received so far
    pub buffer: RecordBuffer,

    /// Scroll position, filters and size
    pub viewport: ViewportState,

    /// Container id, path or stream name being viewed
    pub target: String,

    /// Tail length requested from the source (0 = all)
    pub requested_tail: usize,

    /// Set once the first record or error arrives
    pub ready: bool,

    /// Fatal source error; no records are accepted afterwards
    pub fatal: Option<SourceError>,

    /// Completion message from the pump
    pub info: Option<String>,

    pub help_visible: bool,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(target: impl Into<String>, requested_tail: usize, viewport: ViewportState) -> Self {
        Self {
            buffer: RecordBuffer::new(),
            viewport,
            target: target.into(),
            requested_tail,
            ready: false,
            fatal: None,
            info: None,
            help_visible: false,
            should_quit: false,
        }
    }

    /// Number of records passing the current filter
    pub fn visible_len(&self) -> usize {
        self.buffer.visible_len(self.viewport.filter())
    }

    /// Handle a user action
    pub fn handle_action(&mut self, action: &Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::ToggleHelp => self.help_visible = !self.help_visible,
            Action::CloseHelp => self.help_visible = false,
            _ => {
                self.viewport = transition(&self.viewport, action, self.visible_len());
            }
        }
    }

    /// Handle an event from the pump
    pub fn apply_pump_event(&mut self, event: PumpEvent) {
        match event {
            PumpEvent::Record(record) => {
                if self.fatal.is_some() {
                    return;
                }
                self.ready = true;
                self.buffer.push(record);
                self.viewport = follow_tail(&self.viewport, self.visible_len());
            }
            PumpEvent::Error(error) => {
                warn!(error = %error, "log source failed");
                self.ready = true;
                if error.is_unavailable() {
                    // Nothing to show, end the session
                    self.should_quit = true;
                }
                self.fatal = Some(error);
            }
            PumpEvent::Completed { lines_read, source } => {
                debug!(lines_read, source, "log source exhausted");
                self.info = Some(format!("Read {lines_read} lines from {source}"));
            }
        }
    }

    /// Error that ended the session before any log could be shown
    pub fn abort_reason(&self) -> Option<&SourceError> {
        self.fatal.as_ref().filter(|e| e.is_unavailable())
    }
}
