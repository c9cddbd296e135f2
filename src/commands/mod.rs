//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod filter;
pub mod flat;
pub mod models;
pub mod tree;
pub mod utils;

// Re-export main command functions
pub use filter::execute_filter;
pub use flat::{execute_flat, validate_flat_args};
pub use models::{FilterArgs, FlatArgs, NormalizeArgs, TreeArgs};
pub use tree::{execute_tree, validate_tree_args};
pub use utils::display_version;
