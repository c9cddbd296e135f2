//! Output options for trie dumps.

use crate::filter::ExclusionSet;
use crate::utils::config::{DEFAULT_FLAT_SEPARATOR, DEFAULT_INDENT_WIDTH};
use crate::utils::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// Where insert attributes a record's weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AggregationMode {
    /// Pure call tree: weights are ignored
    Structure,

    /// The terminal node of each record
    #[default]
    Terminal,

    /// Every node along the record's path (inclusive totals)
    Cumulative,
}

impl AggregationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AggregationMode::Structure => "structure",
            AggregationMode::Terminal => "terminal",
            AggregationMode::Cumulative => "cumulative",
        }
    }
    /// Whether records carry a weight into the trie
    pub fn is_weighted(&self) -> bool {
        *self != AggregationMode::Structure
    }
}

impl FromStr for AggregationMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "structure" | "tree" => Ok(AggregationMode::Structure),
            "terminal" | "self" => Ok(AggregationMode::Terminal),
            "cumulative" | "total" => Ok(AggregationMode::Cumulative),
            _ => Err(ConfigError::InvalidAggregationMode(s.to_string())),
        }
    }
}

impl fmt::Display for AggregationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How accumulated weights are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WeightFormat {
    /// Integer, fractional part truncated toward zero
    #[default]
    Truncate,

    /// Shortest decimal that round-trips
    Fractional,
}

impl WeightFormat {
    pub fn format(&self, weight: f64) -> String {
        match self {
            WeightFormat::Truncate => format!("{:.0}", weight.trunc()),
            WeightFormat::Fractional => format!("{}", weight),
        }
    }
}

/// Options for the indented hierarchy dump
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HierarchyOptions {
    /// Emitted once per level of depth
    pub indent: String,
}

impl Default for HierarchyOptions {
    fn default() -> Self {
        Self::spaces(DEFAULT_INDENT_WIDTH)
    }
}

impl HierarchyOptions {
    /// `width` spaces per level
    pub fn spaces(width: usize) -> Self {
        Self {
            indent: " ".repeat(width),
        }
    }

    /// `width` tabs per level
    pub fn tabs(width: usize) -> Self {
        Self {
            indent: "\t".repeat(width),
        }
    }
}

/// Options for the flat weighted dump
#[derive(Debug, Clone, PartialEq)]
pub struct FlatOptions {
    /// Joins frame names into the fully-qualified name
    pub separator: String,

    /// List frames deepest first
    pub reverse_path: bool,

    pub weight_format: WeightFormat,

    /// Lines whose name contains any of these are dropped
    pub exclusions: ExclusionSet,
}

impl Default for FlatOptions {
    fn default() -> Self {
        Self {
            separator: DEFAULT_FLAT_SEPARATOR.to_string(),
            reverse_path: false,
            weight_format: WeightFormat::default(),
            exclusions: ExclusionSet::new(),
        }
    }
}

impl FlatOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn with_exclusions(mut self, exclusions: ExclusionSet) -> Self {
        self.exclusions = exclusions;
        self
    }

    pub fn with_weight_format(mut self, weight_format: WeightFormat) -> Self {
        self.weight_format = weight_format;
        self
    }

    pub fn with_reverse_path(mut self, reverse_path: bool) -> Self {
        self.reverse_path = reverse_path;
        self
    }
}

/// Which dump to produce
#[derive(Debug, Clone)]
pub enum DumpFormat {
    Hierarchy(HierarchyOptions),
    Flat(FlatOptions),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_format() {
        assert_eq!(WeightFormat::Truncate.format(5.0), "5");
        assert_eq!(WeightFormat::Truncate.format(2.9), "2");
        assert_eq!(WeightFormat::Fractional.format(2.5), "2.5");
        assert_eq!(WeightFormat::Fractional.format(3.0), "3");
    }

    #[test]
    fn test_truncate_past_i64_range() {
        assert_eq!(WeightFormat::Truncate.format(1e20), "100000000000000000000");
        assert_eq!(WeightFormat::Truncate.format(0.5), "0");
    }

    #[test]
    fn test_only_structure_is_unweighted() {
        assert!(!AggregationMode::Structure.is_weighted());
        assert!(AggregationMode::Terminal.is_weighted());
        assert!(AggregationMode::Cumulative.is_weighted());
    }

    #[test]
    fn test_aggregation_mode_from_str() {
        assert_eq!(
            "Cumulative".parse::<AggregationMode>().unwrap(),
            AggregationMode::Cumulative
        );
        assert_eq!(
            "self".parse::<AggregationMode>().unwrap(),
            AggregationMode::Terminal
        );
        assert!("sideways".parse::<AggregationMode>().is_err());
    }

    #[test]
    fn test_hierarchy_indent_units() {
        assert_eq!(HierarchyOptions::default().indent, " ");
        assert_eq!(HierarchyOptions::spaces(4).indent, "    ");
        assert_eq!(HierarchyOptions::tabs(2).indent, "\t\t");
    }
}
