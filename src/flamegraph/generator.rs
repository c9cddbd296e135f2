//! SVG flamegraph generation and terminal summaries.
//!
//! The SVG is rendered by inferno from the collapsed stacks of a finalized
//! trie. The text summary is a table of hot paths with a bar per path.

use crate::aggregator::stack_builder::CollapsedStack;
use crate::output::schema::HotPath;
use crate::utils::config::FRAME_DELIMITER;
use crate::utils::error::FlamegraphError;
use inferno::flamegraph::{self, Options};
use log::info;

/// Flamegraph configuration
#[derive(Debug, Clone)]
pub struct FlamegraphConfig {
    pub title: String,
    pub width: usize,
    /// Unit shown in frame tooltips
    pub count_name: String,
}

impl Default for FlamegraphConfig {
    fn default() -> Self {
        Self {
            title: "Call Tree Profile".to_string(),
            width: 1200,
            count_name: "samples".to_string(),
        }
    }
}

impl FlamegraphConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_count_name(mut self, count_name: impl Into<String>) -> Self {
        self.count_name = count_name.into();
        self
    }
}

/// Generate SVG flamegraph from collapsed stacks
///
/// **Public** - main entry point for SVG rendering
///
/// # Errors
/// * `FlamegraphError::EmptyStacks` - nothing carries weight
/// * `FlamegraphError::GenerationFailed` - inferno rejected the input
pub fn generate_flamegraph(
    stacks: &[CollapsedStack],
    config: Option<&FlamegraphConfig>,
) -> Result<String, FlamegraphError> {
    if stacks.is_empty() {
        return Err(FlamegraphError::EmptyStacks);
    }

    let config = config.cloned().unwrap_or_default();
    info!("Generating flamegraph with {} stacks", stacks.len());

    let mut options = Options::default();
    options.title = config.title.clone();
    options.count_name = config.count_name.clone();
    options.image_width = Some(config.width);

    let lines: Vec<String> = stacks.iter().map(CollapsedStack::to_line).collect();
    let mut svg = Vec::new();
    flamegraph::from_lines(&mut options, lines.iter().map(String::as_str), &mut svg)
        .map_err(|e| FlamegraphError::GenerationFailed(e.to_string()))?;

    let svg_content = String::from_utf8_lossy(&svg).into_owned();
    info!(
        "Flamegraph generated successfully ({} bytes)",
        svg_content.len()
    );
    Ok(svg_content)
}

/// Create a text summary with percentages and table formatting
pub fn generate_text_summary(hot_paths: &[HotPath], max_lines: usize) -> String {
    let mut lines = Vec::new();

    lines.extend(render_hot_path_table(hot_paths, max_lines));
    lines.push("".to_string());
    lines.extend(render_ascii_bars(hot_paths));

    if hot_paths.len() > max_lines {
        lines.push("".to_string());
        lines.push(format!(
            "   (Showing top {} of {} paths)",
            max_lines,
            hot_paths.len()
        ));
    }

    lines.join("\n")
}

/// Helper to render the hot path table for terminal output
fn render_hot_path_table(hot_paths: &[HotPath], max_lines: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let rule = format!("  +{}+{}+{}+", "-".repeat(50), "-".repeat(14), "-".repeat(9));

    lines.push("  HOT PATHS".to_string());
    lines.push(rule.clone());
    lines.push(format!(
        "  | {:<48} | {:^12} | {:^7} |",
        "Stack (Heaviest First)", "WEIGHT", "%"
    ));
    lines.push(rule.clone());

    for path in hot_paths.iter().take(max_lines) {
        lines.push(format!(
            "  | {:<48} | {:>12} | {:>6.1}% |",
            truncate_stack(&path.stack, 48),
            path.weight,
            path.percentage
        ));
    }

    lines.push(rule);
    lines
}

/// Helper to render one bar per hot path, leaf frame as the label
fn render_ascii_bars(hot_paths: &[HotPath]) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("  SIMPLIFIED FLAMEGRAPH".to_string());
    lines.push(format!("  {:<20} {} 100%", "root", "#".repeat(50)));

    for path in hot_paths.iter().take(5) {
        let bar_width = (path.percentage / 2.0) as usize; // Max 50 chars
        let leaf = path
            .stack
            .rsplit(FRAME_DELIMITER)
            .next()
            .unwrap_or(&path.stack);

        lines.push(format!(
            "  {:<20} {:<50} {:>5.1}%",
            truncate_stack(leaf, 20),
            "#".repeat(bar_width),
            path.percentage
        ));
    }
    lines
}

/// Keep the tail of a long stack, prefixed with an ellipsis
pub fn truncate_stack(s: &str, max_len: usize) -> String {
    let len = s.chars().count();
    if len > max_len {
        let keep = max_len.saturating_sub(3);
        let tail: String = s.chars().skip(len - keep).collect();
        format!("...{}", tail)
    } else {
        s.to_string()
    }
}
