//! Shared types for dockscope
//!
//! This crate contains data structures used across multiple dockscope crates.

use std::fmt;

// ============================================================================
// Log Types
// ============================================================================

/// Log severity level after canonicalization
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Level {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    /// Any token outside the known set, stored uppercased
    Other(String),
}

impl Level {
    /// Canonicalize a raw level token.
    ///
    /// Matching is case-insensitive and ignores surrounding whitespace. Unknown
    /// tokens pass through uppercased, an empty token means INFO.
    pub fn canonical(token: &str) -> Self {
        let upper = token.trim().to_uppercase();
        match upper.as_str() {
            "" | "INFO" | "INFORMATION" | "LOG" | "STATEMENT" | "STMT" | "NOTICE" => Self::Info,
            "ERROR" | "ERR" | "FATAL" | "PANIC" => Self::Error,
            "WARN" | "WARNING" => Self::Warn,
            "DEBUG" | "DBG" => Self::Debug,
            _ => Self::Other(upper),
        }
    }

    /// Display string as shown inside the level brackets
    pub fn as_str(&self) -> &str {
        match self {
            Self::Error => "ERROR",
            Self::Warn => "WARN",
            Self::Info => "INFO",
            Self::Debug => "DEBUG",
            Self::Other(s) => s,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw value stored when a line carries no text at all
pub const EMPTY_LINE: &str = "<empty line>";

/// A single normalized log record.
///
/// Records are created once by the classifier and never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct LogRecord {
    /// Timestamp in its original textual form (may be empty)
    pub timestamp: String,

    /// Canonical level
    pub level: Level,

    /// Primary message text
    pub message: String,

    /// Embedded job/process/session identifier
    pub correlation_id: Option<String>,

    /// Error detail carried by structured lines
    pub error_detail: Option<String>,

    /// Original line, kept when no message could be extracted
    pub raw: String,
}

impl LogRecord {
    /// Create a record with a timestamp, level and message
    pub fn new(timestamp: impl Into<String>, level: Level, message: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            level,
            message: message.into(),
            ..Default::default()
        }
    }

    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        let id = id.into();
        self.correlation_id = (!id.is_empty()).then_some(id);
        self
    }

    pub fn with_error_detail(mut self, detail: impl Into<String>) -> Self {
        let detail = detail.into();
        self.error_detail = (!detail.is_empty()).then_some(detail);
        self
    }

    /// Seal the record against the line it came from.
    ///
    /// Guarantees that at least one of `message` and `raw` is non-empty.
    pub fn sealed(mut self, original: &str) -> Self {
        if self.message.is_empty() && self.raw.is_empty() {
            self.raw = if original.trim().is_empty() {
                EMPTY_LINE.to_string()
            } else {
                original.to_string()
            };
        }
        self
    }
}

/// Counts per canonical level
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LevelCounts {
    pub error: usize,
    pub warn: usize,
    pub info: usize,
    pub debug: usize,
    pub other: usize,
}

impl LevelCounts {
    pub fn record(&mut self, level: &Level) {
        match level {
            Level::Error => self.error += 1,
            Level::Warn => self.warn += 1,
            Level::Info => self.info += 1,
            Level::Debug => self.debug += 1,
            Level::Other(_) => self.other += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.error + self.warn + self.info + self.debug + self.other
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_canonical_table() {
        assert_eq!(Level::canonical("WARNING"), Level::Warn);
        assert_eq!(Level::canonical("err"), Level::Error);
        assert_eq!(Level::canonical("Information"), Level::Info);
        assert_eq!(Level::canonical("dbg"), Level::Debug);
        assert_eq!(Level::canonical("LOG"), Level::Info);
        assert_eq!(Level::canonical("statement"), Level::Info);
        assert_eq!(Level::canonical("STMT"), Level::Info);
        assert_eq!(Level::canonical("notice"), Level::Info);
        assert_eq!(Level::canonical("fatal"), Level::Error);
        assert_eq!(Level::canonical("PANIC"), Level::Error);
        assert_eq!(Level::canonical(""), Level::Info);
        assert_eq!(Level::canonical("  "), Level::Info);
        assert_eq!(Level::canonical("trace"), Level::Other("TRACE".to_string()));
    }

    #[test]
    fn test_sealed_keeps_raw_when_message_empty() {
        let record = LogRecord::new("2025-07-19T00:26:48Z", Level::Info, "").sealed("2025-07-19T00:26:48Z");
        assert_eq!(record.raw, "2025-07-19T00:26:48Z");

        let blank = LogRecord::new("", Level::Info, "").sealed("");
        assert_eq!(blank.raw, EMPTY_LINE);
    }

    #[test]
    fn test_empty_ids_are_dropped() {
        let record = LogRecord::new("", Level::Info, "x")
            .with_correlation_id("")
            .with_error_detail("");
        assert!(record.correlation_id.is_none());
        assert!(record.error_detail.is_none());
    }

    proptest! {
        #[test]
        fn canonical_is_idempotent(token in "\\PC{0,12}") {
            let once = Level::canonical(&token);
            let twice = Level::canonical(once.as_str());
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn canonical_ignores_case(token in "[a-zA-Z]{0,12}") {
            prop_assert_eq!(
                Level::canonical(&token.to_lowercase()),
                Level::canonical(&token.to_uppercase())
            );
        }
    }
}
