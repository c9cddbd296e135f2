//! Helpers shared by the commands.

use super::models::NormalizeArgs;
use crate::aggregator::{build_call_trie, AggregationMode, CallTrie};
use crate::normalizer::{NormalizeStats, Normalizer};
use crate::utils::config::SCHEMA_VERSION;
use anyhow::{Context, Result};
use log::{debug, info};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Open the input: the given file, or stdin when `None`
pub fn open_input(path: Option<&Path>) -> Result<Box<dyn BufRead>> {
    match path {
        Some(path) => {
            info!("Reading input from: {}", path.display());
            let file = File::open(path)
                .with_context(|| format!("Failed to open input {}", path.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => {
            info!("Reading input from stdin");
            Ok(Box::new(BufReader::new(io::stdin().lock())))
        }
    }
}

/// Name of the input as shown in reports
pub fn source_label(path: Option<&Path>) -> String {
    path.map(|p| p.display().to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Read every input line through a normalizer into a new trie
///
/// Invalid UTF-8 is replaced rather than rejected; a read error stops
/// the run.
pub fn aggregate_input(
    input: Option<&Path>,
    normalize: &NormalizeArgs,
    mode: AggregationMode,
) -> Result<(CallTrie, NormalizeStats)> {
    let config = normalize.to_config().with_weighted(mode.is_weighted());
    let mut normalizer = Normalizer::new(config).context("Invalid normalizer configuration")?;
    let reader = open_input(input)?;

    let mut read_error = None;
    let lines = reader.split(b'\n').map_while(|chunk| match chunk {
        Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
        Err(e) => {
            read_error = Some(e);
            None
        }
    });
    let trie = build_call_trie(lines, &mut normalizer, mode);

    if let Some(e) = read_error {
        return Err(e).context("Failed to read input");
    }

    let stats = *normalizer.stats();
    info!("Records: {}", stats.summary());
    debug!("Trie holds {} records", trie.records());

    Ok((trie, stats))
}

/// Display version information
pub fn display_version() {
    println!("calltrie v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Merge flat call-stack records into sorted call trees and weighted lists.");
}
