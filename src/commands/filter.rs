//! Filter command implementation.
//! Copies lines through, dropping those that contain an excluded string.

use super::models::FilterArgs;
use super::utils::open_input;
use crate::filter::{filter_lines, ExclusionSet};
use crate::output::open_sink;
use anyhow::{Context, Result};
use log::info;

/// Execute the filter command
pub fn execute_filter(args: FilterArgs) -> Result<()> {
    let exclusions = ExclusionSet::load(&args.exclude).context("Failed to load exclusion file")?;

    let input = open_input(args.input.as_deref())?;
    let sink = open_sink(args.output.as_deref()).context("Failed to open output")?;

    let stats = filter_lines(input, sink, &exclusions).context("Failed to filter lines")?;

    info!(
        "Kept {} of {} lines",
        stats.lines_written, stats.lines_read
    );
    Ok(())
}
