//! Calltrie
//!
//! Merge flat, semicolon-separated call-stack records into a sorted call
//! tree, a flat weighted list, or a flamegraph.
//!
//! This crate provides the core implementation for the `calltrie` CLI
//! tool: a [`normalizer`] that turns raw lines into records and an
//! [`aggregator`] trie that merges them.
//!
//! ## Getting Started
//!
//! ```bash
//! calltrie tree samples.txt
//! calltrie flat --exclude noise.txt --flamegraph profile.svg samples.txt
//! ```

pub mod aggregator;
pub mod commands;
pub mod filter;
pub mod flamegraph;
pub mod normalizer;
pub mod output;
pub mod utils;
