//! Aggregation of normalized records into a call trie and metrics.
//!
//! This module transforms records into:
//! - A sorted prefix tree (hierarchy and flat dumps)
//! - Collapsed stack format (for flamegraph generation)
//! - Hot path analysis and weight distribution statistics

pub mod dump;
pub mod metrics;
pub mod stack_builder;
pub mod trie;

// Re-export main types and functions
pub use dump::{AggregationMode, DumpFormat, FlatOptions, HierarchyOptions, WeightFormat};
pub use metrics::{calculate_hot_paths, calculate_weight_distribution, WeightDistribution};
pub use stack_builder::{build_call_trie, build_collapsed_stacks, CollapsedStack};
pub use trie::{CallTrie, FinalizedTrie, FlatEntry, Node};
