//! Flat command implementation.
//!
//! The flat command:
//! 1. Loads the exclusion set
//! 2. Reads, normalizes and aggregates the input lines
//! 3. Writes the flat weighted list
//! 4. Optionally writes a JSON report, an SVG flamegraph and a summary

use super::models::FlatArgs;
use super::utils::{aggregate_input, source_label};
use crate::aggregator::{
    build_collapsed_stacks, calculate_hot_paths, calculate_weight_distribution, AggregationMode,
    DumpFormat, FinalizedTrie, FlatEntry, FlatOptions,
};
use crate::filter::ExclusionSet;
use crate::flamegraph::{generate_flamegraph, generate_text_summary};
use crate::normalizer::NormalizeStats;
use crate::output::schema::Report;
use crate::output::{open_sink, write_report, write_svg};
use crate::utils::config::{MAX_TOP_PATHS, SCHEMA_VERSION};
use anyhow::{Context, Result};
use log::{info, warn};
use std::time::Instant;

/// Execute the flat command
///
/// **Public** - main entry point called from main.rs
pub fn execute_flat(args: FlatArgs) -> Result<()> {
    let start_time = Instant::now();

    let exclusions = match &args.exclude {
        Some(path) => ExclusionSet::load(path).context("Failed to load exclusion file")?,
        None => ExclusionSet::new(),
    };

    let (trie, stats) = aggregate_input(args.input.as_deref(), &args.normalize, args.mode)?;

    let options = FlatOptions::new()
        .with_separator(args.separator.clone())
        .with_reverse_path(args.reverse_path || args.normalize.reverse)
        .with_weight_format(args.weight_format)
        .with_exclusions(exclusions);

    let sink = open_sink(args.output.as_deref()).context("Failed to open output")?;
    let trie = trie
        .dump(&DumpFormat::Flat(options.clone()), sink)
        .context("Failed to write flat list")?;

    if args.json.is_some() || args.print_summary {
        let entries = trie.flat_entries(&options);

        if let Some(json_path) = &args.json {
            let report = build_report(&args, &trie, &stats, &entries);
            write_report(&report, json_path).context("Failed to write JSON report")?;
            info!("Report written to: {}", json_path.display());
        }

        if args.print_summary {
            let distribution = calculate_weight_distribution(&entries);
            let hot_paths = calculate_hot_paths(&entries, distribution.total_weight, args.top_paths);
            eprintln!("{}", distribution.summary());
            if distribution.is_highly_concentrated() {
                eprintln!(
                    "Note: the heaviest 10% of paths carry {:.1}% of the weight",
                    distribution.top_10_percent_percentage
                );
            }
            eprintln!("{}", generate_text_summary(&hot_paths, args.top_paths));
        }
    }

    if let Some(svg_path) = &args.flamegraph {
        write_flamegraph(&args, &trie, svg_path)?;
    }

    info!(
        "Flat list written: {} nodes from {} records ({:.2}s)",
        trie.node_count(),
        trie.records(),
        start_time.elapsed().as_secs_f64()
    );
    Ok(())
}

/// Assemble the JSON report for a finished run
///
/// **Public** - exposed for tests and library callers
pub fn build_report(
    args: &FlatArgs,
    trie: &FinalizedTrie,
    stats: &NormalizeStats,
    entries: &[FlatEntry],
) -> Report {
    let total_weight = trie.total_weight();

    Report {
        version: SCHEMA_VERSION.to_string(),
        source: source_label(args.input.as_deref()),
        aggregation: trie.mode().to_string(),
        records: *stats,
        node_count: trie.node_count(),
        max_depth: trie.depth(),
        unique_paths: entries.len(),
        total_weight,
        hot_paths: calculate_hot_paths(entries, total_weight, args.top_paths),
        generated_at: chrono::Utc::now().to_rfc3339(),
    }
}

fn write_flamegraph(args: &FlatArgs, trie: &FinalizedTrie, svg_path: &std::path::Path) -> Result<()> {
    let stacks = build_collapsed_stacks(trie);
    if stacks.is_empty() {
        warn!("No weighted stacks, skipping flamegraph");
        return Ok(());
    }

    info!("Generating flamegraph...");
    let svg = generate_flamegraph(&stacks, Some(&args.flamegraph_config))
        .context("Failed to generate flamegraph")?;
    write_svg(&svg, svg_path).context("Failed to write flamegraph SVG")?;
    info!("Flamegraph written to: {}", svg_path.display());
    Ok(())
}

/// Validate flat arguments
///
/// **Public** - can be called before execute_flat for early validation
pub fn validate_flat_args(args: &FlatArgs) -> Result<()> {
    if args.mode == AggregationMode::Structure {
        anyhow::bail!("flat output needs weights: use terminal or cumulative mode");
    }

    if args.separator.is_empty() {
        anyhow::bail!("separator cannot be empty");
    }

    if args.top_paths == 0 {
        anyhow::bail!("top_paths must be greater than 0");
    }

    if args.top_paths > MAX_TOP_PATHS {
        anyhow::bail!("top_paths is too large (max {})", MAX_TOP_PATHS);
    }

    if args.flamegraph.is_some() && args.flamegraph_config.width == 0 {
        anyhow::bail!("flamegraph width must be greater than 0");
    }

    if let Some(input) = &args.input {
        if !input.is_file() {
            anyhow::bail!("Input file not found: {}", input.display());
        }
    }

    if let Some(exclude) = &args.exclude {
        if !exclude.is_file() {
            anyhow::bail!("Exclusion file not found: {}", exclude.display());
        }
    }

    Ok(())
}
