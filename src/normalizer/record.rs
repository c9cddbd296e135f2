//! Normalized records and normalization counters.

use serde::{Deserialize, Serialize};

/// One call stack sample: ordered frames plus the weight it contributes
///
/// **Public** - produced by the normalizer, consumed by the trie
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Frames in insertion order (root first unless the record was reversed)
    pub frames: Vec<String>,

    /// Non-negative weight, 1 when the line carried no measure
    pub weight: f64,
}

impl Record {
    /// Create a new record
    pub fn new(frames: Vec<String>, weight: f64) -> Self {
        Self { frames, weight }
    }
}

/// What happened to the lines fed through a normalizer
///
/// **Public** - logged after each run and embedded in the JSON report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizeStats {
    /// Every line handed to the normalizer
    pub lines_read: usize,

    /// Lines that became records
    pub accepted: usize,

    /// Lines without any token
    pub blank: usize,

    /// Lines rejected by the inclusion pattern
    pub filtered: usize,

    /// Lines dropped because of a bad weight or a bad frame
    pub malformed: usize,
}

impl NormalizeStats {
    /// Lines that did not become records
    pub fn skipped(&self) -> usize {
        self.blank + self.filtered + self.malformed
    }

    /// Get human-readable summary
    ///
    /// **Public** - for logging and debugging
    pub fn summary(&self) -> String {
        format!(
            "Read: {} | Accepted: {} | Blank: {} | Filtered: {} | Malformed: {}",
            self.lines_read, self.accepted, self.blank, self.filtered, self.malformed
        )
    }
}
