//! Log processing for dockscope
//!
//! This crate provides line classification, buffering, filtering, and the
//! pump that streams classified records out of a source.

mod buffer;
mod filter;
mod parser;
mod patterns;
mod stream;

pub use buffer::RecordBuffer;
pub use filter::{RecordFilter, is_error_like};
pub use parser::{LogParser, strip_multiplex_header};
pub use patterns::{LinePattern, patterns};
pub use stream::{LogPump, PumpEvent};

// Re-export types used in our public API
pub use dockscope_source::SourceError;
pub use dockscope_types::{Level, LevelCounts, LogRecord};
