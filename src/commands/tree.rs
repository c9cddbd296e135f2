//! Tree command implementation.
//!
//! The tree command:
//! 1. Reads and normalizes the input lines
//! 2. Merges them into a call trie
//! 3. Writes the indented hierarchy

use super::models::TreeArgs;
use super::utils::aggregate_input;
use crate::aggregator::{AggregationMode, DumpFormat, HierarchyOptions};
use crate::output::open_sink;
use anyhow::{Context, Result};
use log::info;
use std::time::Instant;

/// Upper bound for `--indent`
const MAX_INDENT_WIDTH: usize = 16;

/// Execute the tree command
///
/// **Public** - main entry point called from main.rs
pub fn execute_tree(args: TreeArgs) -> Result<()> {
    let start_time = Instant::now();

    let (trie, _stats) = aggregate_input(
        args.input.as_deref(),
        &args.normalize,
        AggregationMode::Structure,
    )?;

    let options = if args.tabs {
        HierarchyOptions::tabs(args.indent_width)
    } else {
        HierarchyOptions::spaces(args.indent_width)
    };

    let sink = open_sink(args.output.as_deref()).context("Failed to open output")?;
    let trie = trie
        .dump(&DumpFormat::Hierarchy(options), sink)
        .context("Failed to write call tree")?;

    info!(
        "Call tree written: {} nodes, depth {} ({:.2}s)",
        trie.node_count(),
        trie.depth(),
        start_time.elapsed().as_secs_f64()
    );
    Ok(())
}

/// Validate tree arguments
///
/// **Public** - can be called before execute_tree for early validation
pub fn validate_tree_args(args: &TreeArgs) -> Result<()> {
    if args.indent_width == 0 {
        anyhow::bail!("indent width must be greater than 0");
    }

    if args.indent_width > MAX_INDENT_WIDTH {
        anyhow::bail!("indent width is too large (max {})", MAX_INDENT_WIDTH);
    }

    if let Some(input) = &args.input {
        if !input.is_file() {
            anyhow::bail!("Input file not found: {}", input.display());
        }
    }

    Ok(())
}
