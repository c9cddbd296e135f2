//! Calltrie CLI
//!
//! Turns flat call-stack samples into sorted call trees, weighted lists
//! and flamegraphs.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use calltrie::aggregator::{AggregationMode, WeightFormat};
use calltrie::commands::{
    display_version, execute_filter, execute_flat, execute_tree, validate_flat_args,
    validate_tree_args, FilterArgs, FlatArgs, NormalizeArgs, TreeArgs,
};
use calltrie::flamegraph::FlamegraphConfig;
use calltrie::normalizer::SortMode;

/// Calltrie - merge call-stack samples into call trees
#[derive(Parser, Debug)]
#[command(name = "calltrie")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Options controlling how input lines become records
#[derive(Args, Debug)]
struct NormalizeOpts {
    /// Regex pattern to filter the input lines (matched at the start of the stack)
    #[arg(short, long)]
    pattern: Option<String>,

    /// Sort order: 0 = by names, 1 = by line numbers, 2 = skip line numbers
    #[arg(short, long, default_value = "0")]
    sort_mode: String,

    /// Rewrite `name-ordinal` frames according to the sort order
    #[arg(long)]
    ordinals: bool,

    /// Stacks are listed leaf first; flat output keeps them leaf first
    #[arg(long)]
    reverse: bool,

    /// Drop stacks with frames that lack an ordinal (default: keep them verbatim)
    #[arg(long)]
    strict: bool,

    /// Prefix removed from every stack (e.g. "cpu.trace.")
    #[arg(long)]
    strip_prefix: Option<String>,
}

impl NormalizeOpts {
    fn into_args(self) -> Result<NormalizeArgs> {
        Ok(NormalizeArgs {
            pattern: self.pattern,
            strip_prefix: self.strip_prefix,
            reverse: self.reverse,
            ordinals: self.ordinals,
            sort_mode: self.sort_mode.parse::<SortMode>()?,
            strict: self.strict,
        })
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the merged call tree as an indented hierarchy
    Tree {
        /// Input file (defaults to stdin)
        input: Option<PathBuf>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Indent units per tree level
        #[arg(long, default_value = "1")]
        indent: usize,

        /// Indent with tabs instead of spaces
        #[arg(long)]
        tabs: bool,

        #[command(flatten)]
        normalize: NormalizeOpts,
    },

    /// Print one weighted line per stack
    Flat {
        /// Input file (defaults to stdin)
        input: Option<PathBuf>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// File with strings which won't go into the output, one per line
        #[arg(short = 'f', long)]
        exclude: Option<PathBuf>,

        /// Weight attribution: terminal or cumulative
        #[arg(short, long, default_value = "terminal")]
        mode: String,

        /// Separator between frames in the output
        #[arg(long, default_value = ";")]
        separator: String,

        /// Print frames deepest first (always on with --reverse)
        #[arg(long)]
        reverse_path: bool,

        /// Keep fractional weights instead of truncating
        #[arg(long)]
        fractional: bool,

        /// Output path for JSON report (optional)
        #[arg(long)]
        json: Option<PathBuf>,

        /// Output path for SVG flamegraph (optional)
        #[arg(long)]
        flamegraph: Option<PathBuf>,

        /// Flamegraph title
        #[arg(long)]
        title: Option<String>,

        /// Flamegraph width in pixels
        #[arg(long, default_value = "1200")]
        width: usize,

        /// Unit shown in flamegraph tooltips (e.g. "samples", "ms")
        #[arg(long)]
        count_name: Option<String>,

        /// Number of top hot paths to include
        #[arg(long, default_value = "20")]
        top_paths: usize,

        /// Print text summary to stderr
        #[arg(long)]
        summary: bool,

        #[command(flatten)]
        normalize: NormalizeOpts,
    },

    /// Drop lines containing any string from an exclusion file
    Filter {
        /// Input file (defaults to stdin)
        input: Option<PathBuf>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// File with strings which won't go into the output, one per line
        #[arg(short = 'f', long)]
        exclude: PathBuf,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging (stderr, so dumps on stdout stay clean)
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Tree {
            input,
            output,
            indent,
            tabs,
            normalize,
        } => {
            let args = TreeArgs {
                input,
                output,
                normalize: normalize.into_args()?,
                indent_width: indent,
                tabs,
            };

            validate_tree_args(&args)?;
            execute_tree(args)?;
        }

        Commands::Flat {
            input,
            output,
            exclude,
            mode,
            separator,
            reverse_path,
            fractional,
            json,
            flamegraph,
            title,
            width,
            count_name,
            top_paths,
            summary,
            normalize,
        } => {
            let mut fg_config = FlamegraphConfig::new();
            if let Some(title_str) = title {
                fg_config = fg_config.with_title(title_str);
            }
            if let Some(unit) = count_name {
                fg_config = fg_config.with_count_name(unit);
            }
            fg_config.width = width;

            let args = FlatArgs {
                input,
                output,
                normalize: normalize.into_args()?,
                exclude,
                mode: mode.parse::<AggregationMode>()?,
                separator,
                reverse_path,
                weight_format: if fractional {
                    WeightFormat::Fractional
                } else {
                    WeightFormat::Truncate
                },
                json,
                flamegraph,
                flamegraph_config: fg_config,
                top_paths,
                print_summary: summary,
            };

            validate_flat_args(&args)?;
            execute_flat(args)?;
        }

        Commands::Filter {
            input,
            output,
            exclude,
        } => {
            execute_filter(FilterArgs {
                input,
                output,
                exclude,
            })?;
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
