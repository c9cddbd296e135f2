//! Record normalization.
//!
//! This module turns raw text lines into records:
//! - Key extraction and weight parsing
//! - Anchored inclusion filtering
//! - Frame splitting, reversal and ordinal-aware rewriting

pub mod line;
pub mod record;
pub mod rewrite;

// Re-export main types and functions
pub use line::{MalformedPolicy, Normalizer, NormalizerConfig};
pub use record::{NormalizeStats, Record};
pub use rewrite::{rewrite_frame, SortMode};
