//! Substring exclusion filtering.

pub mod exclusion;

pub use exclusion::{filter_lines, ExclusionSet, FilterStats};
