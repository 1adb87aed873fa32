//! Display-line rendering
//!
//! Turns visible records into tagged text lines. The functions here are pure:
//! styling is applied later by looking up each [`SpanTag`] in the theme, and
//! the wall clock only enters through the `fallback_time` argument.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDateTime, NaiveTime};
use regex::Regex;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use dockscope_logs::RecordBuffer;
use dockscope_types::{Level, LogRecord};

use crate::app::ViewportState;

/// Canonical display form of timestamps
pub const TIME_FORMAT: &str = "%H:%M:%S%.3f";

// Most specific first. RFC 3339 is tried before these.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.fZ",
    "%Y-%m-%dT%H:%M:%SZ",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];
const TIME_FORMATS: &[&str] = &["%H:%M:%S%.f", "%H:%M:%S"];

static TIME_OF_DAY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]{2}:[0-9]{2}:[0-9]{2})(?:\.([0-9]+))?").unwrap());

/// What a piece of display text is, used to pick its style
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SpanTag {
    Timestamp,
    Level(Level),
    Message,
    /// The `error=<detail>` segment of an ERROR record
    ErrorDetail,
    /// Separators
    Plain,
}

/// One terminal row of tagged text
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DisplayLine {
    pub spans: Vec<(SpanTag, String)>,
}

impl DisplayLine {
    /// Plain text of the line
    pub fn text(&self) -> String {
        self.spans.iter().map(|(_, text)| text.as_str()).collect()
    }

    /// Display width in terminal columns
    pub fn width(&self) -> usize {
        self.spans.iter().map(|(_, text)| text.width()).sum()
    }
}

/// Format a record timestamp as `HH:MM:SS.mmm`.
///
/// Returns `None` when no time of day can be found; callers substitute the
/// current time.
pub fn format_timestamp(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.format(TIME_FORMAT).to_string());
    }
    for format in DATETIME_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(ts.format(TIME_FORMAT).to_string());
        }
    }
    for format in TIME_FORMATS {
        if let Ok(ts) = NaiveTime::parse_from_str(raw, format) {
            return Some(ts.format(TIME_FORMAT).to_string());
        }
    }

    // Anything that merely contains a time of day
    let caps = TIME_OF_DAY.captures(raw)?;
    let millis: String = caps
        .get(2)
        .map_or("", |m| m.as_str())
        .chars()
        .take(3)
        .collect();
    Some(format!("{}.{:0<3}", &caps[1], millis))
}

/// Compose the single unwrapped line for a record:
/// `HH:MM:SS.mmm [LEVEL] message jobID=<id> error=<detail>`
pub fn compose_record(record: &LogRecord, fallback_time: &str) -> Vec<(SpanTag, String)> {
    let time = format_timestamp(&record.timestamp).unwrap_or_else(|| fallback_time.to_string());

    let mut spans = vec![
        (SpanTag::Timestamp, time),
        (SpanTag::Plain, " ".to_string()),
        (SpanTag::Level(record.level.clone()), format!("[{}]", record.level)),
        (SpanTag::Plain, " ".to_string()),
    ];

    let mut parts = Vec::new();
    if !record.message.is_empty() {
        parts.push((SpanTag::Message, record.message.clone()));
    }
    if let Some(id) = &record.correlation_id {
        parts.push((SpanTag::Message, format!("jobID={id}")));
    }
    if let Some(detail) = &record.error_detail {
        let tag = if record.level.is_error() {
            SpanTag::ErrorDetail
        } else {
            SpanTag::Message
        };
        parts.push((tag, format!("error={detail}")));
    }
    if parts.is_empty() {
        parts.push((SpanTag::Message, record.raw.clone()));
    }

    for (i, part) in parts.into_iter().enumerate() {
        if i > 0 {
            spans.push((SpanTag::Plain, " ".to_string()));
        }
        spans.push(part);
    }
    spans
}

/// Word-wrap a composed line to `width` columns, keeping the tag of every word.
///
/// A line that already fits is returned untouched. Otherwise words are packed
/// greedily and a word wider than `width` is split across lines. A width of
/// zero disables wrapping.
pub fn wrap_spans(spans: Vec<(SpanTag, String)>, width: usize) -> Vec<DisplayLine> {
    let line = DisplayLine { spans };
    if width == 0 || line.width() <= width {
        return vec![line];
    }

    let mut packer = Packer::new(width);
    for (tag, text) in &line.spans {
        for word in text.split_whitespace() {
            packer.push_word(tag.clone(), word);
        }
    }

    packer
        .finish()
        .into_iter()
        .map(|words| {
            let mut spans: Vec<(SpanTag, String)> = Vec::new();
            for (tag, word) in words {
                if let Some((_, text)) = spans.last_mut().filter(|(last, _)| *last == tag) {
                    text.push(' ');
                    text.push_str(&word);
                    continue;
                }
                if !spans.is_empty() {
                    spans.push((SpanTag::Plain, " ".to_string()));
                }
                spans.push((tag, word));
            }
            DisplayLine { spans }
        })
        .collect()
}

/// Greedy line packer over tagged words
struct Packer<T> {
    width: usize,
    lines: Vec<Vec<(T, String)>>,
    current: Vec<(T, String)>,
    current_width: usize,
}

impl<T: Clone> Packer<T> {
    fn new(width: usize) -> Self {
        Self {
            width,
            lines: Vec::new(),
            current: Vec::new(),
            current_width: 0,
        }
    }

    fn push_word(&mut self, tag: T, word: &str) {
        let word_width = word.width();

        if !self.current.is_empty() {
            if self.current_width + 1 + word_width <= self.width {
                self.current.push((tag, word.to_string()));
                self.current_width += 1 + word_width;
                return;
            }
            self.flush();
        }

        if word_width <= self.width {
            self.current.push((tag, word.to_string()));
            self.current_width = word_width;
            return;
        }

        // Hard split; the remainder starts the next line
        let mut chunk = String::new();
        let mut chunk_width = 0;
        for ch in word.chars() {
            let ch_width = ch.width().unwrap_or(0);
            if chunk_width + ch_width > self.width && !chunk.is_empty() {
                self.lines.push(vec![(tag.clone(), std::mem::take(&mut chunk))]);
                chunk_width = 0;
            }
            chunk.push(ch);
            chunk_width += ch_width;
        }
        if !chunk.is_empty() {
            self.current.push((tag, chunk));
            self.current_width = chunk_width;
        }
    }

    fn flush(&mut self) {
        if !self.current.is_empty() {
            self.lines.push(std::mem::take(&mut self.current));
        }
        self.current_width = 0;
    }

    fn finish(mut self) -> Vec<Vec<(T, String)>> {
        self.flush();
        self.lines
    }
}

/// Render already-selected records.
///
/// Wrapping (to `width - 2` columns) only applies to these records; the result
/// is cut to the rows available for logs.
pub fn render_lines(
    records: &[&LogRecord],
    viewport: &ViewportState,
    fallback_time: &str,
) -> Vec<DisplayLine> {
    let rows = viewport.log_rows();
    let wrap_width = (viewport.width as usize).saturating_sub(2);

    let mut lines = Vec::new();
    for record in records {
        if lines.len() >= rows {
            break;
        }
        let spans = compose_record(record, fallback_time);
        if viewport.wrap_enabled {
            lines.extend(wrap_spans(spans, wrap_width));
        } else {
            lines.push(DisplayLine { spans });
        }
    }

    lines.truncate(rows);
    lines
}

/// Select the visible records of `buffer` and render them
pub fn render_view(
    buffer: &RecordBuffer,
    viewport: &ViewportState,
    fallback_time: &str,
) -> Vec<DisplayLine> {
    let filter = viewport.filter();
    let range = viewport.visible_range(buffer.visible_len(filter));
    let records = buffer.visible_range(filter, range);
    render_lines(&records, viewport, fallback_time)
}
