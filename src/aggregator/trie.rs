//! Prefix tree that merges call stacks sharing a common prefix.
//!
//! A trie is built once per run: construct, insert every record, finalize,
//! dump. Finalization consumes the [`CallTrie`] and hands back a
//! [`FinalizedTrie`], so no record can be inserted after a dump.

use super::dump::{AggregationMode, DumpFormat, FlatOptions, HierarchyOptions};
use crate::normalizer::Record;
use log::debug;
use std::collections::BTreeMap;
use std::io::{self, Write};

/// One frame at one depth
///
/// Children are kept in a `BTreeMap` so iteration is always in
/// ascending byte order of the frame name, whatever the insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Node {
    children: BTreeMap<String, Node>,
    weight: f64,
}

impl Node {
    /// Weight accumulated at this node
    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn child(&self, name: &str) -> Option<&Node> {
        self.children.get(name)
    }

    /// Children in ascending name order
    pub fn children(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.children.iter().map(|(name, node)| (name.as_str(), node))
    }

    /// Sum of the children's weights
    pub fn children_weight(&self) -> f64 {
        self.children.values().map(|child| child.weight).sum()
    }

    /// Nodes in this subtree, this one excluded
    fn descendant_count(&self) -> usize {
        self.children
            .values()
            .map(|child| 1 + child.descendant_count())
            .sum()
    }

    /// Longest path below this node
    fn height(&self) -> usize {
        self.children
            .values()
            .map(|child| 1 + child.height())
            .max()
            .unwrap_or(0)
    }

    fn total_weight(&self) -> f64 {
        self.children
            .values()
            .map(|child| child.weight + child.total_weight())
            .sum()
    }
}

/// A single line of a flat dump
#[derive(Debug, Clone, PartialEq)]
pub struct FlatEntry {
    /// Frame names joined with the flat separator
    pub name: String,

    /// Weight accumulated at the node
    pub weight: f64,
}

impl FlatEntry {
    pub fn new(name: impl Into<String>, weight: f64) -> Self {
        Self {
            name: name.into(),
            weight,
        }
    }
}

/// A trie that still accepts records
///
/// **Public** - main aggregation type
#[derive(Debug, Clone, Default)]
pub struct CallTrie {
    root: Node,
    mode: AggregationMode,
    records: usize,
}

impl CallTrie {
    pub fn new(mode: AggregationMode) -> Self {
        Self {
            root: Node::default(),
            mode,
            records: 0,
        }
    }

    /// Merge one frame sequence into the tree
    ///
    /// **Public** - called once per record
    ///
    /// Missing nodes are created on the way down. The weight lands
    /// according to the aggregation mode; inserting the same path twice
    /// sums the weights. An empty sequence is ignored.
    pub fn insert<S: AsRef<str>>(&mut self, frames: &[S], weight: f64) {
        if frames.is_empty() {
            return;
        }

        let mode = self.mode;
        let mut node = &mut self.root;
        for frame in frames {
            node = node.children.entry(frame.as_ref().to_string()).or_default();
            if mode == AggregationMode::Cumulative {
                node.weight += weight;
            }
        }

        if mode == AggregationMode::Terminal {
            node.weight += weight;
        }

        self.records += 1;
    }

    pub fn insert_record(&mut self, record: &Record) {
        self.insert(&record.frames, record.weight);
    }

    pub fn mode(&self) -> AggregationMode {
        self.mode
    }

    /// Records merged so far (empty ones are not counted)
    pub fn records(&self) -> usize {
        self.records
    }

    pub fn is_empty(&self) -> bool {
        self.root.children.is_empty()
    }

    /// Stop accepting records
    pub fn finalize(self) -> FinalizedTrie {
        debug!(
            "Finalizing trie: {} records, {} nodes",
            self.records,
            self.root.descendant_count()
        );
        FinalizedTrie {
            root: self.root,
            mode: self.mode,
            records: self.records,
        }
    }

    /// Finalize and write the first dump
    ///
    /// # Returns
    /// The finalized trie, which can be dumped again in any format
    pub fn dump<W: Write>(self, format: &DumpFormat, sink: W) -> io::Result<FinalizedTrie> {
        let trie = self.finalize();
        match format {
            DumpFormat::Hierarchy(options) => trie.dump_hierarchy(sink, options)?,
            DumpFormat::Flat(options) => {
                trie.dump_flat(sink, options)?;
            }
        }
        Ok(trie)
    }
}

/// A trie that no longer changes
#[derive(Debug, Clone)]
pub struct FinalizedTrie {
    root: Node,
    mode: AggregationMode,
    records: usize,
}

impl FinalizedTrie {
    /// The unnamed root; it only holds the top-level frames
    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn mode(&self) -> AggregationMode {
        self.mode
    }

    pub fn records(&self) -> usize {
        self.records
    }

    pub fn is_empty(&self) -> bool {
        self.root.children.is_empty()
    }

    /// Number of named nodes
    pub fn node_count(&self) -> usize {
        self.root.descendant_count()
    }

    /// Deepest frame level (0 for an empty trie)
    pub fn depth(&self) -> usize {
        self.root.height()
    }

    /// Total weight inserted
    pub fn total_weight(&self) -> f64 {
        match self.mode {
            AggregationMode::Structure => 0.0,
            AggregationMode::Terminal => self.root.total_weight(),
            AggregationMode::Cumulative => self.root.children_weight(),
        }
    }

    /// Look a node up by its full path
    pub fn get<S: AsRef<str>>(&self, path: &[S]) -> Option<&Node> {
        path.iter()
            .try_fold(&self.root, |node, frame| node.child(frame.as_ref()))
    }

    /// Write the indented hierarchy
    ///
    /// **Public** - hierarchy mode output
    ///
    /// Pre-order, children in ascending order; a node at depth `d`
    /// is preceded by `d` copies of the indent unit.
    pub fn dump_hierarchy<W: Write>(
        &self,
        mut sink: W,
        options: &HierarchyOptions,
    ) -> io::Result<()> {
        for (name, child) in self.root.children() {
            write_hierarchy(&mut sink, name, child, 0, &options.indent)?;
        }
        sink.flush()
    }

    /// Collect the flat entries, sorted by joined name
    ///
    /// Nodes with zero weight are skipped. Entries whose name equals their
    /// own formatted weight, or contains an excluded string, are dropped.
    pub fn flat_entries(&self, options: &FlatOptions) -> Vec<FlatEntry> {
        let mut entries = Vec::new();
        let mut path = Vec::new();
        for (name, child) in self.root.children() {
            collect_flat(child, name, &mut path, options, &mut entries);
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        entries
            .into_iter()
            .filter(|entry| {
                entry.name != options.weight_format.format(entry.weight)
                    && !options.exclusions.is_excluded(&entry.name)
            })
            .collect()
    }

    /// Write the flat weighted list
    ///
    /// **Public** - flat mode output
    ///
    /// # Returns
    /// Number of lines written
    pub fn dump_flat<W: Write>(&self, mut sink: W, options: &FlatOptions) -> io::Result<usize> {
        let entries = self.flat_entries(options);
        for entry in &entries {
            writeln!(
                sink,
                "{} {}",
                entry.name,
                options.weight_format.format(entry.weight)
            )?;
        }
        sink.flush()?;
        Ok(entries.len())
    }
}

fn write_hierarchy<W: Write>(
    sink: &mut W,
    name: &str,
    node: &Node,
    depth: usize,
    indent: &str,
) -> io::Result<()> {
    writeln!(sink, "{}{}", indent.repeat(depth), name)?;
    for (child_name, child) in node.children() {
        write_hierarchy(sink, child_name, child, depth + 1, indent)?;
    }
    Ok(())
}

fn collect_flat<'a>(
    node: &'a Node,
    name: &'a str,
    path: &mut Vec<&'a str>,
    options: &FlatOptions,
    entries: &mut Vec<FlatEntry>,
) {
    path.push(name);

    if node.weight != 0.0 {
        let joined = if options.reverse_path {
            path.iter().rev().copied().collect::<Vec<_>>().join(options.separator.as_str())
        } else {
            path.join(options.separator.as_str())
        };
        entries.push(FlatEntry::new(joined, node.weight));
    }

    for (child_name, child) in node.children() {
        collect_flat(child, child_name, path, options, entries);
    }

    path.pop();
}
