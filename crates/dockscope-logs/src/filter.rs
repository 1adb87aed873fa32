use dockscope_types::LogRecord;

/// Substrings (lowercase) that make a record error-like
const ERROR_KEYWORDS: &[&str] = &[
    "error",
    "exception",
    "failed",
    "failure",
    "panic",
    "fatal",
    "ошибка",
    "исключение",
    "сбой",
    "критическая ошибка",
    "stack trace",
    "stacktrace",
    "stack-trace",
    "traceback",
    "crash",
    "segmentation fault",
    "timeout",
    "connection refused",
    "permission denied",
    "not found",
    "already exists",
    "invalid",
    "malformed",
];

/// Which records the viewer shows
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RecordFilter {
    #[default]
    All,
    ErrorsOnly,
}

impl RecordFilter {
    pub fn from_errors_only(errors_only: bool) -> Self {
        if errors_only {
            Self::ErrorsOnly
        } else {
            Self::All
        }
    }

    /// Check if a record passes this filter
    pub fn matches(&self, record: &LogRecord) -> bool {
        match self {
            Self::All => true,
            Self::ErrorsOnly => is_error_like(record),
        }
    }
}

/// Whether a record looks like an error.
///
/// True for canonical ERROR, for records with an error detail, and for
/// records whose message or raw text mentions an error keyword.
pub fn is_error_like(record: &LogRecord) -> bool {
    if record.level.is_error() {
        return true;
    }

    if record.error_detail.as_deref().is_some_and(|d| !d.is_empty()) {
        return true;
    }

    contains_error_keyword(&record.message) || contains_error_keyword(&record.raw)
}

fn contains_error_keyword(text: &str) -> bool {
    if text.is_empty() {
        return false;
    }
    let lower = text.to_lowercase();
    ERROR_KEYWORDS.iter().any(|keyword| lower.contains(keyword))
}
