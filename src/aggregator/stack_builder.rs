//! Build call tries from raw lines, and collapsed stacks from call tries.
//!
//! Collapsed stacks are the input format for flamegraph generation.
//! Format: "parent;child;grandchild weight"
//!
//! Example: "main;execute_tx;storage_read 1000"
//! This means: main called execute_tx which called storage_read, with 1000
//! samples attributed to storage_read itself.

use super::dump::AggregationMode;
use super::trie::{CallTrie, FinalizedTrie, Node};
use crate::normalizer::Normalizer;
use crate::utils::config::FRAME_DELIMITER;
use log::debug;
use serde::{Deserialize, Serialize};

/// A single collapsed stack entry
///
/// **Public** - used by flamegraph generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollapsedStack {
    /// Stack trace as semicolon-separated string
    pub stack: String,

    /// Self weight of the stack's last frame
    pub weight: u64,
}

impl CollapsedStack {
    /// Create a new collapsed stack
    ///
    /// **Public** - constructor
    pub fn new(stack: String, weight: u64) -> Self {
        Self { stack, weight }
    }

    /// Render as a folded line
    pub fn to_line(&self) -> String {
        format!("{} {}", self.stack, self.weight)
    }
}

/// Feed lines through a normalizer into a fresh trie
///
/// **Public** - main entry point for aggregation
///
/// # Arguments
/// * `lines` - Raw input lines
/// * `normalizer` - Configured normalizer; its counters keep accumulating.
///   In structure mode it stops reading weights.
/// * `mode` - Where record weights are attributed
///
/// # Returns
/// A trie still open for more records
pub fn build_call_trie<I, S>(lines: I, normalizer: &mut Normalizer, mode: AggregationMode) -> CallTrie
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut trie = CallTrie::new(mode);

    if !mode.is_weighted() && normalizer.config().weighted {
        debug!("{} mode: ignoring weights", mode);
        normalizer.ignore_weights();
    }

    for line in lines {
        if let Some(record) = normalizer.normalize(line.as_ref()) {
            trie.insert_record(&record);
        }
    }

    debug!(
        "Built trie from {} records ({})",
        trie.records(),
        normalizer.stats().summary()
    );

    trie
}

/// Build collapsed stacks from a finalized trie
///
/// **Public** - feeds the flamegraph generator
///
/// # Returns
/// One stack per node with a nonzero self weight, sorted by weight
/// (descending), then by stack
///
/// # Algorithm
/// 1. Walk the trie depth first, tracking the frame path
/// 2. Derive each node's self weight from the aggregation mode
/// 3. Truncate to whole units, dropping zero stacks
pub fn build_collapsed_stacks(trie: &FinalizedTrie) -> Vec<CollapsedStack> {
    let mut stacks = Vec::new();
    let mut path: Vec<&str> = Vec::new();

    for (name, child) in trie.root().children() {
        collect_stacks(child, name, trie.mode(), &mut path, &mut stacks);
    }

    stacks.sort_by(|a, b| b.weight.cmp(&a.weight).then_with(|| a.stack.cmp(&b.stack)));
    debug!("Built {} unique collapsed stacks", stacks.len());

    stacks
}

/// Weight attributed to the node itself, excluding its callees
fn self_weight(node: &Node, mode: AggregationMode) -> f64 {
    match mode {
        AggregationMode::Structure => 0.0,
        AggregationMode::Terminal => node.weight(),
        AggregationMode::Cumulative => (node.weight() - node.children_weight()).max(0.0),
    }
}

fn collect_stacks<'a>(
    node: &'a Node,
    name: &'a str,
    mode: AggregationMode,
    path: &mut Vec<&'a str>,
    stacks: &mut Vec<CollapsedStack>,
) {
    path.push(name);

    let weight = self_weight(node, mode).trunc() as u64;
    if weight > 0 {
        let delimiter = FRAME_DELIMITER.to_string();
        stacks.push(CollapsedStack::new(path.join(delimiter.as_str()), weight));
    }

    for (child_name, child) in node.children() {
        collect_stacks(child, child_name, mode, path, stacks);
    }

    path.pop();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::NormalizerConfig;

    #[test]
    fn test_collapsed_stack_to_line() {
        let stack = CollapsedStack::new("main;execute;storage_read".to_string(), 1000);
        assert_eq!(stack.to_line(), "main;execute;storage_read 1000");
    }

    #[test]
    fn test_build_call_trie_counts() {
        let mut normalizer = Normalizer::new(NormalizerConfig::new()).unwrap();
        let lines = ["main;foo 2", "", "main;foo 3", "main;bar x"];

        let trie = build_call_trie(lines, &mut normalizer, AggregationMode::Terminal).finalize();

        assert_eq!(trie.records(), 2);
        assert_eq!(trie.get(&["main", "foo"]).unwrap().weight(), 5.0);
        assert_eq!(normalizer.stats().blank, 1);
        assert_eq!(normalizer.stats().malformed, 1);
    }

    #[test]
    fn test_cumulative_self_weights() {
        let mut trie = CallTrie::new(AggregationMode::Cumulative);
        trie.insert(&["a"], 1.0);
        trie.insert(&["a", "b"], 4.0);
        trie.insert(&["a", "c"], 2.0);

        let stacks = build_collapsed_stacks(&trie.finalize());

        assert_eq!(
            stacks,
            vec![
                CollapsedStack::new("a;b".to_string(), 4),
                CollapsedStack::new("a;c".to_string(), 2),
                CollapsedStack::new("a".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_structure_mode_has_no_stacks() {
        let mut trie = CallTrie::new(AggregationMode::Structure);
        trie.insert(&["a", "b"], 4.0);
        assert!(build_collapsed_stacks(&trie.finalize()).is_empty());
    }
}
