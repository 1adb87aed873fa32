mod help_overlay;
mod status_bar;

pub use help_overlay::HelpOverlay;
pub use status_bar::{StatusBar, level_counts_text, viewer_hints};
