use crate::aggregator::{AggregationMode, WeightFormat};
use crate::flamegraph::FlamegraphConfig;
use crate::normalizer::{MalformedPolicy, NormalizerConfig, SortMode};
use crate::utils::config::{DEFAULT_FLAT_SEPARATOR, DEFAULT_INDENT_WIDTH};
use std::path::PathBuf;

/// Normalization options shared by the aggregating commands
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone, Default)]
pub struct NormalizeArgs {
    /// Inclusion regex, matched at the start of each key
    pub pattern: Option<String>,

    /// Prefix removed from every key
    pub strip_prefix: Option<String>,

    /// Keys are leaf-to-root
    pub reverse: bool,

    /// Rewrite `<name>-<ordinal>` frames
    pub ordinals: bool,

    /// Layout of rewritten frames
    pub sort_mode: SortMode,

    /// Drop records with frames that cannot be rewritten
    pub strict: bool,
}

impl NormalizeArgs {
    pub fn to_config(&self) -> NormalizerConfig {
        NormalizerConfig {
            pattern: self.pattern.clone(),
            strip_prefix: self.strip_prefix.clone(),
            reverse: self.reverse,
            rewrite_ordinals: self.ordinals,
            sort_mode: self.sort_mode,
            malformed: if self.strict {
                MalformedPolicy::Strict
            } else {
                MalformedPolicy::Lenient
            },
            weighted: true,
        }
    }
}

/// Arguments for the tree command
#[derive(Debug, Clone)]
pub struct TreeArgs {
    /// Input file (stdin when `None`)
    pub input: Option<PathBuf>,

    /// Output file (stdout when `None`)
    pub output: Option<PathBuf>,

    pub normalize: NormalizeArgs,

    /// Indent units per level
    pub indent_width: usize,

    /// Indent with tabs instead of spaces
    pub tabs: bool,
}

impl Default for TreeArgs {
    fn default() -> Self {
        Self {
            input: None,
            output: None,
            normalize: NormalizeArgs::default(),
            indent_width: DEFAULT_INDENT_WIDTH,
            tabs: false,
        }
    }
}

/// Arguments for the flat command
#[derive(Debug, Clone)]
pub struct FlatArgs {
    /// Input file (stdin when `None`)
    pub input: Option<PathBuf>,

    /// Output file (stdout when `None`)
    pub output: Option<PathBuf>,

    pub normalize: NormalizeArgs,

    /// Exclusion file, one substring per line
    pub exclude: Option<PathBuf>,

    /// Where record weights are attributed
    pub mode: AggregationMode,

    /// Joins frame names in the output
    pub separator: String,

    /// Print frames deepest first; implied by `normalize.reverse`
    pub reverse_path: bool,

    pub weight_format: WeightFormat,

    /// Path for the JSON report (optional)
    pub json: Option<PathBuf>,

    /// Path for the SVG flamegraph (optional)
    pub flamegraph: Option<PathBuf>,

    /// Flamegraph configuration
    pub flamegraph_config: FlamegraphConfig,

    /// Number of hot paths in the report and summary
    pub top_paths: usize,

    /// Print a text summary to stderr
    pub print_summary: bool,
}

impl Default for FlatArgs {
    fn default() -> Self {
        Self {
            input: None,
            output: None,
            normalize: NormalizeArgs::default(),
            exclude: None,
            mode: AggregationMode::Terminal,
            separator: DEFAULT_FLAT_SEPARATOR.to_string(),
            reverse_path: false,
            weight_format: WeightFormat::Truncate,
            json: None,
            flamegraph: None,
            flamegraph_config: FlamegraphConfig::default(),
            top_paths: 20,
            print_summary: false,
        }
    }
}

/// Arguments for the filter command
#[derive(Debug, Clone, Default)]
pub struct FilterArgs {
    /// Input file (stdin when `None`)
    pub input: Option<PathBuf>,

    /// Output file (stdout when `None`)
    pub output: Option<PathBuf>,

    /// Exclusion file, one substring per line
    pub exclude: PathBuf,
}
