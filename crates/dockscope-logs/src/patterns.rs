//! Ordered chain of full-line text recognizers.
//!
//! Each pattern pairs a regex (plus an optional guard on its captures) with an
//! extractor. The chain is evaluated in order and the first pattern that
//! matches the whole line governs.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use dockscope_types::{Level, LogRecord};

/// Docker `--timestamps` prefix, e.g. `2025-07-19T00:26:54.972365013Z`
pub(crate) const DOCKER_TS: &str = r"[0-9]{4}-[0-9]{2}-[0-9]{2}T[0-9]{2}:[0-9]{2}:[0-9]{2}(?:\.[0-9]+)?Z";

/// Date and time as written by PostgreSQL and friends, e.g. `2025-07-19 00:26:54.972`
const DATE_TIME: &str = r"[0-9]{4}-[0-9]{2}-[0-9]{2} [0-9]{2}:[0-9]{2}:[0-9]{2}(?:\.[0-9]+)?";

/// Timezone abbreviation after a date-time (`GMT`, `UTC`, `CEST`)
const ZONE: &str = r"(?: [A-Z]{2,5})?";

/// Keywords that mark free text as an error, checked before warn/debug
const ERROR_HINTS: &[&str] = &[
    "error",
    "failed",
    "exception",
    "fatal",
    "panic",
    "connection refused",
    "permission denied",
    "segmentation fault",
];

/// A single full-line recognizer
pub struct LinePattern {
    name: &'static str,
    regex: Regex,
    accept: fn(&Captures) -> bool,
    extract: fn(&Captures) -> LogRecord,
}

impl LinePattern {
    fn new(name: &'static str, pattern: &str, extract: fn(&Captures) -> LogRecord) -> Self {
        Self {
            name,
            regex: Regex::new(pattern).unwrap(),
            accept: |_| true,
            extract,
        }
    }

    fn guarded(mut self, accept: fn(&Captures) -> bool) -> Self {
        self.accept = accept;
        self
    }

    /// Pattern name, used in tests and trace output
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Try this pattern against a trimmed line
    pub fn apply(&self, line: &str) -> Option<LogRecord> {
        let caps = self.regex.captures(line)?;
        (self.accept)(&caps).then(|| (self.extract)(&caps))
    }
}

static PATTERNS: LazyLock<Vec<LinePattern>> = LazyLock::new(build_patterns);

/// Embedded timestamp anywhere in a line, most specific form first
static EMBEDDED_TS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"({DOCKER_TS}|{DATE_TIME}|[0-9]{{2}}:[0-9]{{2}}:[0-9]{{2}}(?:\.[0-9]+)?)"
    ))
    .unwrap()
});

/// The recognizers in evaluation order
pub fn patterns() -> &'static [LinePattern] {
    &PATTERNS
}

/// Run the full-line chain, returning the first match
pub fn match_line(line: &str) -> Option<LogRecord> {
    PATTERNS.iter().find_map(|pattern| {
        let record = pattern.apply(line)?;
        tracing::trace!(pattern = pattern.name, "line matched");
        Some(record)
    })
}

/// Locate a timestamp-shaped substring and use the rest of the line as message
pub fn match_embedded_timestamp(line: &str) -> Option<LogRecord> {
    let ts = EMBEDDED_TS.find(line)?.as_str();
    let message = line.replacen(ts, "", 1).trim().to_string();
    let level = infer_level(&message);
    Some(LogRecord::new(ts, level, message))
}

/// Infer a level from free text by keyword scan
pub fn infer_level(text: &str) -> Level {
    let lower = text.to_lowercase();
    if ERROR_HINTS.iter().any(|hint| lower.contains(hint)) {
        Level::Error
    } else if lower.contains("warn") {
        Level::Warn
    } else if lower.contains("debug") {
        Level::Debug
    } else {
        Level::Info
    }
}

fn cap<'a>(caps: &'a Captures, i: usize) -> &'a str {
    caps.get(i).map_or("", |m| m.as_str())
}

/// PostgreSQL-style `[pid] LEVEL: message`
fn postgres_record(ts: &str, pid: &str, level: &str, message: &str) -> LogRecord {
    let record = if level.eq_ignore_ascii_case("STATEMENT") {
        LogRecord::new(ts, Level::Info, format!("SQL: {}", message))
    } else {
        LogRecord::new(ts, Level::canonical(level), message)
    };
    record.with_correlation_id(pid)
}

fn freetext_record(ts: &str, message: &str) -> LogRecord {
    LogRecord::new(ts, infer_level(message), message)
}

fn build_patterns() -> Vec<LinePattern> {
    vec![
        // 2025-07-19T00:26:54.972365013Z 2025-07-19 00:26:54.972 GMT [100] ERROR: relation "x" does not exist
        LinePattern::new(
            "docker-postgres",
            &format!(r"^({DOCKER_TS})\s+({DATE_TIME}){ZONE} \[([0-9]+)\] (\w+):\s*(.+)$"),
            |c| postgres_record(cap(c, 1), cap(c, 3), cap(c, 4), cap(c, 5)),
        )
        .guarded(|c| !cap(c, 4).eq_ignore_ascii_case("STATEMENT")),
        // 2025-07-19T00:26:54.972381388Z 2025-07-19 00:26:54.972 GMT [100] STATEMENT: SELECT 1
        LinePattern::new(
            "docker-postgres-statement",
            &format!(r"^({DOCKER_TS})\s+({DATE_TIME}){ZONE} \[([0-9]+)\] (STATEMENT):\s*(.+)$"),
            |c| postgres_record(cap(c, 1), cap(c, 3), cap(c, 4), cap(c, 5)),
        ),
        // 2025-07-19 00:26:48.173 GMT [1] LOG: database system is ready
        LinePattern::new(
            "postgres",
            &format!(r"^({DATE_TIME}){ZONE} \[([0-9]+)\] (\w+):\s*(.+)$"),
            |c| postgres_record(cap(c, 1), cap(c, 2), cap(c, 3), cap(c, 4)),
        ),
        // 2025-07-19T00:26:48.025548052Z postgresql 00:26:48.02 INFO  ==> Starting
        LinePattern::new(
            "docker-service",
            &format!(r"^({DOCKER_TS})\s+(\w+)\s+([0-9]{{2}}:[0-9]{{2}}:[0-9]{{2}}\.[0-9]{{2}})\s+(\w+)\s+(.+)$"),
            |c| {
                LogRecord::new(cap(c, 1), Level::canonical(cap(c, 4)), cap(c, 5))
                    .with_correlation_id(cap(c, 2))
            },
        ),
        // postgresql 00:26:48.02 INFO  ==> Starting
        LinePattern::new(
            "service",
            r"^(\w+)\s+([0-9]{2}:[0-9]{2}:[0-9]{2}\.[0-9]{2})\s+(\w+)\s+(.+)$",
            |c| {
                LogRecord::new(cap(c, 2), Level::canonical(cap(c, 3)), cap(c, 4))
                    .with_correlation_id(cap(c, 1))
            },
        ),
        // 2025-07-19T00:26:48.124332552Z
        LinePattern::new("docker-empty", &format!(r"^({DOCKER_TS})$"), |c| {
            LogRecord::new(cap(c, 1), Level::Info, "")
        }),
        // [2025-07-19T00:26:48Z] [WARN] message
        LinePattern::new(
            "bracket-level",
            &format!(r"^({DOCKER_TS})?\s*\[(\w+)\]\s*(.+)$"),
            |c| LogRecord::new(cap(c, 1), Level::canonical(cap(c, 2)), cap(c, 3)),
        ),
        // 15:04:05.000 [INFO] message
        LinePattern::new(
            "time-bracket-level",
            r"^([0-9]{2}:[0-9]{2}:[0-9]{2}(?:\.[0-9]{3})?)\s+\[(\w+)\]\s+(.+)$",
            |c| LogRecord::new(cap(c, 1), Level::canonical(cap(c, 2)), cap(c, 3)),
        ),
        // 2025-07-19T00:26:48.025548052Z anything at all
        LinePattern::new("docker-text", &format!(r"^({DOCKER_TS})\s+(.+)$"), |c| {
            freetext_record(cap(c, 1), cap(c, 2))
        }),
        // 2025-07-19 10:30:45 anything at all
        LinePattern::new(
            "datetime-text",
            r"^([0-9]{4}-[0-9]{2}-[0-9]{2} [0-9]{2}:[0-9]{2}:[0-9]{2})\s+(.+)$",
            |c| freetext_record(cap(c, 1), cap(c, 2)),
        ),
        // 15:04:05 anything at all
        LinePattern::new(
            "time-text",
            r"^([0-9]{2}:[0-9]{2}:[0-9]{2}(?:\.[0-9]{2,3})?)\s+(.+)$",
            |c| freetext_record(cap(c, 1), cap(c, 2)),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(name: &str) -> &'static LinePattern {
        patterns()
            .iter()
            .find(|p| p.name() == name)
            .unwrap_or_else(|| panic!("no pattern named {}", name))
    }

    #[test]
    fn test_chain_order() {
        let names: Vec<_> = patterns().iter().map(|p| p.name()).collect();
        assert_eq!(
            names,
            vec![
                "docker-postgres",
                "docker-postgres-statement",
                "postgres",
                "docker-service",
                "service",
                "docker-empty",
                "bracket-level",
                "time-bracket-level",
                "docker-text",
                "datetime-text",
                "time-text",
            ]
        );
    }

    #[test]
    fn test_docker_postgres() {
        let record = pattern("docker-postgres")
            .apply(r#"2025-07-19T00:26:54.972365013Z 2025-07-19 00:26:54.972 GMT [100] ERROR: relation "mat_object" does not exist"#)
            .unwrap();
        assert_eq!(record.timestamp, "2025-07-19T00:26:54.972365013Z");
        assert_eq!(record.level, Level::Error);
        assert_eq!(record.correlation_id.as_deref(), Some("100"));
        assert_eq!(record.message, r#"relation "mat_object" does not exist"#);
    }

    #[test]
    fn test_docker_postgres_rejects_statement() {
        let line = "2025-07-19T00:26:54.972381388Z 2025-07-19 00:26:54.972 GMT [100] STATEMENT: SELECT * FROM mat_object";
        assert!(pattern("docker-postgres").apply(line).is_none());

        let record = pattern("docker-postgres-statement").apply(line).unwrap();
        assert_eq!(record.level, Level::Info);
        assert_eq!(record.message, "SQL: SELECT * FROM mat_object");
        assert_eq!(record.correlation_id.as_deref(), Some("100"));
    }

    #[test]
    fn test_postgres_without_docker_timestamp() {
        let record = pattern("postgres")
            .apply("2025-07-19 00:26:48.173 GMT [1] LOG: database system is ready to accept connections")
            .unwrap();
        assert_eq!(record.timestamp, "2025-07-19 00:26:48.173");
        assert_eq!(record.level, Level::Info);
        assert_eq!(record.correlation_id.as_deref(), Some("1"));
        assert_eq!(record.message, "database system is ready to accept connections");
    }

    #[test]
    fn test_service_prefix() {
        let record = pattern("docker-service")
            .apply("2025-07-19T00:26:48.025548052Z postgresql 00:26:48.02 INFO  ==> Starting PostgreSQL")
            .unwrap();
        assert_eq!(record.timestamp, "2025-07-19T00:26:48.025548052Z");
        assert_eq!(record.level, Level::Info);
        assert_eq!(record.correlation_id.as_deref(), Some("postgresql"));
        assert_eq!(record.message, "==> Starting PostgreSQL");

        let bare = pattern("service")
            .apply("postgresql 00:26:48.02 WARN ==> Low memory")
            .unwrap();
        assert_eq!(bare.timestamp, "00:26:48.02");
        assert_eq!(bare.level, Level::Warn);
    }

    #[test]
    fn test_docker_empty() {
        let record = pattern("docker-empty")
            .apply("2025-07-19T00:26:48.124332552Z")
            .unwrap();
        assert_eq!(record.message, "");
        assert_eq!(record.level, Level::Info);
    }

    #[test]
    fn test_bracket_levels() {
        let record = pattern("bracket-level").apply("[warning] disk almost full").unwrap();
        assert_eq!(record.timestamp, "");
        assert_eq!(record.level, Level::Warn);
        assert_eq!(record.message, "disk almost full");

        let timed = pattern("time-bracket-level")
            .apply("15:04:05.000 [DBG] cache warm")
            .unwrap();
        assert_eq!(timed.timestamp, "15:04:05.000");
        assert_eq!(timed.level, Level::Debug);
    }

    #[test]
    fn test_freetext_inference() {
        let record = pattern("docker-text")
            .apply("2025-07-19T00:26:48Z Unhandled exception in worker")
            .unwrap();
        assert_eq!(record.level, Level::Error);

        let record = pattern("datetime-text")
            .apply("2025-07-19 10:30:45 warning: cache miss")
            .unwrap();
        assert_eq!(record.level, Level::Warn);

        let record = pattern("time-text").apply("15:04:05 debug tick").unwrap();
        assert_eq!(record.level, Level::Debug);
        assert_eq!(record.message, "debug tick");
    }

    #[test]
    fn test_embedded_timestamp() {
        let record = match_embedded_timestamp("worker-3 at 12:00:01.5 request failed").unwrap();
        assert_eq!(record.timestamp, "12:00:01.5");
        assert_eq!(record.message, "worker-3 at  request failed");
        assert_eq!(record.level, Level::Error);

        assert!(match_embedded_timestamp("no time here").is_none());
    }

    #[test]
    fn test_non_ascii_digits_are_not_timestamps() {
        let line = "١٢:٠٠:٠١ request failed";
        assert!(match_embedded_timestamp(line).is_none());
        assert!(match_line(line).is_none());
        assert!(pattern("postgres").apply("2025-07-19 00:26:48 GMT [١] LOG: ready").is_none());
    }

    #[test]
    fn test_infer_level() {
        assert_eq!(infer_level("Connection refused by upstream"), Level::Error);
        assert_eq!(infer_level("WARN: slow"), Level::Warn);
        assert_eq!(infer_level("debugging"), Level::Debug);
        assert_eq!(infer_level("all good"), Level::Info);
    }
}
