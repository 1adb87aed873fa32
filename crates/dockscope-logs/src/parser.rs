use serde_json::{Map, Value};

use dockscope_types::{Level, LogRecord};

use crate::patterns::{infer_level, match_embedded_timestamp, match_line};

/// Size of the stream multiplexing header Docker puts in front of each frame
const MULTIPLEX_HEADER_LEN: usize = 8;

// Common field names, most specific first
const TIME_FIELDS: &[&str] = &["time", "timestamp", "ts"];
const LEVEL_FIELDS: &[&str] = &["level", "lvl", "severity"];
const MESSAGE_FIELDS: &[&str] = &["msg", "message"];
const CORRELATION_FIELDS: &[&str] = &["jobID", "job_id", "jobId"];
const ERROR_FIELDS: &[&str] = &["error", "err"];

/// Turns raw log lines into normalized records
pub struct LogParser;

impl LogParser {
    /// Classify a raw text line. Never fails.
    pub fn classify(raw: &str) -> LogRecord {
        Self::classify_bytes(raw.as_bytes())
    }

    /// Classify a raw byte line as read from a source.
    ///
    /// The multiplex header is stripped before the bytes are decoded, invalid
    /// UTF-8 is replaced rather than rejected.
    pub fn classify_bytes(raw: &[u8]) -> LogRecord {
        let text = String::from_utf8_lossy(strip_multiplex_header(raw));
        let line = text.trim();

        let record = Self::try_parse_json(line)
            .or_else(|| match_line(line))
            .or_else(|| match_embedded_timestamp(line))
            .unwrap_or_else(|| LogRecord::new("", infer_level(line), line));

        record.sealed(line)
    }

    /// Parse the part of the line starting at the first `{` as a JSON object.
    ///
    /// Text before the object becomes the timestamp when the object has none.
    fn try_parse_json(line: &str) -> Option<LogRecord> {
        let start = line.find('{')?;
        let value: Value = serde_json::from_str(&line[start..]).ok()?;
        let fields = value.as_object()?;

        let mut timestamp = text_field(fields, TIME_FIELDS).unwrap_or_default();
        if timestamp.is_empty() {
            timestamp = line[..start].trim().to_string();
        }

        let level = Self::extract_level_from_json(fields);
        let message = text_field(fields, MESSAGE_FIELDS).unwrap_or_default();

        let mut record = LogRecord::new(timestamp, level, message);
        if let Some(id) = text_field(fields, CORRELATION_FIELDS) {
            record = record.with_correlation_id(id);
        }
        if let Some(detail) = text_field(fields, ERROR_FIELDS) {
            record = record.with_error_detail(detail);
        }
        Some(record)
    }

    /// Extract the level from JSON fields, including numeric levels
    fn extract_level_from_json(fields: &Map<String, Value>) -> Level {
        match field(fields, LEVEL_FIELDS) {
            Some(Value::String(s)) => Level::canonical(s),
            // Some loggers use numeric levels
            Some(Value::Number(n)) => match n.as_u64() {
                Some(0..=20) => Level::Debug,
                Some(21..=30) => Level::Info,
                Some(31..=40) => Level::Warn,
                Some(_) => Level::Error,
                None => Level::Info,
            },
            _ => Level::Info,
        }
    }
}

/// Drop the 8-byte stream header when the line starts with a stdout/stderr
/// frame marker
pub fn strip_multiplex_header(raw: &[u8]) -> &[u8] {
    match raw.first() {
        Some(0x01 | 0x02) if raw.len() >= MULTIPLEX_HEADER_LEN => &raw[MULTIPLEX_HEADER_LEN..],
        _ => raw,
    }
}

/// First present field among `names`.
///
/// Exact key matches win; otherwise keys are compared ignoring ASCII case, so
/// `Level` and `MSG` are found too.
fn field<'a>(fields: &'a Map<String, Value>, names: &[&str]) -> Option<&'a Value> {
    names.iter().find_map(|name| fields.get(*name)).or_else(|| {
        names.iter().find_map(|name| {
            fields
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, value)| value)
        })
    })
}

/// First present field among `names`, rendered as text
fn text_field(fields: &Map<String, Value>, names: &[&str]) -> Option<String> {
    field(fields, names).and_then(|value| match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    })
}
