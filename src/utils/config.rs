//! Configuration and constants for the CLI.

/// Current JSON report schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Separator between frames inside a record key
pub const FRAME_DELIMITER: char = ';';

/// Separator between `name` and `ordinal` inside a single frame
pub const ORDINAL_SEPARATOR: char = '-';

/// Hyphens left in a rewritten frame are rendered as this path separator
pub const PATH_SEPARATOR: &str = ".";

/// Ordinals are zero-padded to this width so they sort lexically
pub const ORDINAL_WIDTH: usize = 4;

/// Default number of indent units emitted per tree level
pub const DEFAULT_INDENT_WIDTH: usize = 1;

/// Default separator used to join frame names in flat mode
pub const DEFAULT_FLAT_SEPARATOR: &str = ";";

/// Weight attached to a record whose line carries no explicit measure
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Upper bound for `--top-paths`
pub const MAX_TOP_PATHS: usize = 1000;
