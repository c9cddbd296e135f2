//! Flamegraph generation using the inferno library.
//!
//! This module converts collapsed stacks into interactive SVG flamegraphs
//! and renders hot paths as a terminal summary.

pub mod generator;

// Re-export main types
pub use generator::{generate_flamegraph, generate_text_summary, FlamegraphConfig};
