use std::ops::Range;

use dockscope_types::{LevelCounts, LogRecord};

use crate::filter::{RecordFilter, is_error_like};

/// Append-only store of classified records.
///
/// Insertion order is arrival order. Nothing is ever evicted or rewritten;
/// the error-like index and level counts are maintained on append so the
/// viewer never rescans the whole history.
#[derive(Debug, Default)]
pub struct RecordBuffer {
    /// Records in arrival order
    records: Vec<LogRecord>,

    /// Positions of error-like records, ascending
    error_indices: Vec<usize>,

    /// Per-level counts
    level_counts: LevelCounts,
}

impl RecordBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record, returning its logical index
    pub fn push(&mut self, record: LogRecord) -> usize {
        let index = self.records.len();
        if is_error_like(&record) {
            self.error_indices.push(index);
        }
        self.level_counts.record(&record.level);
        self.records.push(record);
        index
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn level_counts(&self) -> &LevelCounts {
        &self.level_counts
    }

    /// Length of the sequence visible through `filter`
    pub fn visible_len(&self, filter: RecordFilter) -> usize {
        match filter {
            RecordFilter::All => self.records.len(),
            RecordFilter::ErrorsOnly => self.error_indices.len(),
        }
    }

    /// Records at `range` positions of the filtered sequence.
    ///
    /// The range is clamped to the visible length.
    pub fn visible_range(&self, filter: RecordFilter, range: Range<usize>) -> Vec<&LogRecord> {
        let len = self.visible_len(filter);
        let end = range.end.min(len);
        let start = range.start.min(end);
        match filter {
            RecordFilter::All => self.records[start..end].iter().collect(),
            RecordFilter::ErrorsOnly => self.error_indices[start..end]
                .iter()
                .map(|&i| &self.records[i])
                .collect(),
        }
    }
}
