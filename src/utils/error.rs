//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Configuration problems detected before any record is processed
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid inclusion pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Invalid sort mode '{0}' (expected 0, 1 or 2)")]
    InvalidSortMode(String),

    #[error("Invalid aggregation mode '{0}' (expected structure, terminal or cumulative)")]
    InvalidAggregationMode(String),
}

/// Errors that can occur while loading or applying an exclusion set
#[derive(Error, Debug)]
pub enum FilterError {
    #[error("Failed to read exclusion file {path}: {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Errors that can occur during flamegraph generation
#[derive(Error, Debug)]
pub enum FlamegraphError {
    #[error("Empty stack data")]
    EmptyStacks,

    #[error("Failed to generate flamegraph: {0}")]
    GenerationFailed(String),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
