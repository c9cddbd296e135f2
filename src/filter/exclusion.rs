//! Exclusion sets: literal substrings that keep a line out of the output.

use crate::utils::error::FilterError;
use log::{debug, info};
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

/// A set of literal substrings
///
/// **Public** - used by flat dumps and the `filter` command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    entries: BTreeSet<String>,
}

impl ExclusionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read one entry per line; trailing whitespace is trimmed and
    /// blank lines are ignored
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, FilterError> {
        let mut set = Self::new();
        for line in reader.lines() {
            set.insert(&line?);
        }
        Ok(set)
    }

    /// Load an exclusion file
    ///
    /// # Errors
    /// * `FilterError::ReadFailed` - the file cannot be opened or read
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FilterError> {
        let path = path.as_ref();
        let read_failed = |source| FilterError::ReadFailed {
            path: path.display().to_string(),
            source,
        };

        let file = File::open(path).map_err(read_failed)?;
        let set = Self::from_reader(BufReader::new(file)).map_err(|e| match e {
            FilterError::IoError(source) => read_failed(source),
            other => other,
        })?;

        info!("Loaded {} exclusion strings from {}", set.len(), path.display());
        Ok(set)
    }

    /// Add an entry; blank entries are ignored
    pub fn insert(&mut self, entry: &str) -> bool {
        let entry = entry.trim_end();
        if entry.is_empty() {
            return false;
        }
        self.entries.insert(entry.to_string())
    }

    /// True when any entry occurs in `text`
    pub fn is_excluded(&self, text: &str) -> bool {
        self.entries.iter().any(|entry| text.contains(entry.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}

impl<S: AsRef<str>> FromIterator<S> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for entry in iter {
            set.insert(entry.as_ref());
        }
        set
    }
}

/// Outcome of [`filter_lines`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterStats {
    pub lines_read: usize,
    pub lines_written: usize,
}

/// Copy lines from `input` to `output`, dropping every line that contains
/// an excluded string. Kept lines lose their trailing whitespace.
///
/// **Public** - main entry point for the `filter` command
pub fn filter_lines<R: BufRead, W: Write>(
    input: R,
    mut output: W,
    exclusions: &ExclusionSet,
) -> Result<FilterStats, FilterError> {
    let mut stats = FilterStats::default();

    for line in input.lines() {
        let line = line?;
        stats.lines_read += 1;
        if exclusions.is_excluded(&line) {
            continue;
        }
        writeln!(output, "{}", line.trim_end())?;
        stats.lines_written += 1;
    }

    output.flush()?;
    debug!(
        "Filtered {} lines, kept {}",
        stats.lines_read, stats.lines_written
    );

    Ok(stats)
}
