//! JSON report schema.
//!
//! The report summarizes one aggregation run: where the lines came from,
//! what the normalizer did with them, and the heaviest flat paths.

use crate::normalizer::NormalizeStats;
use serde::{Deserialize, Serialize};

/// Top-level report written by `flat --json`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Schema version
    pub version: String,

    /// Input file, or `-` for stdin
    pub source: String,

    /// Aggregation mode used to build the trie
    pub aggregation: String,

    /// Normalizer counters
    pub records: NormalizeStats,

    /// Named nodes in the trie
    pub node_count: usize,

    /// Deepest frame level
    pub max_depth: usize,

    /// Flat lines emitted (after suppression)
    pub unique_paths: usize,

    /// Total weight inserted
    pub total_weight: f64,

    /// Heaviest flat paths, heaviest first
    pub hot_paths: Vec<HotPath>,

    /// ISO 8601 timestamp
    pub generated_at: String,
}

/// A heavy path in the aggregated tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotPath {
    /// Fully-qualified frame path
    pub stack: String,

    /// Accumulated weight
    pub weight: f64,

    /// Share of the report's total weight
    pub percentage: f64,
}
