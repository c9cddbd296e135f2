//! Ordinal-aware frame rewriting.
//!
//! Profiler frames often look like `com-etsy-Worker-run-42`: a dotted
//! method path whose dots were flattened into hyphens, followed by a line
//! number. Rewriting splits the line number off, pads it so that lexical
//! order matches numeric order, and re-assembles the frame according to
//! the configured [`SortMode`].

use crate::utils::config::{ORDINAL_SEPARATOR, ORDINAL_WIDTH, PATH_SEPARATOR};
use crate::utils::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// How a rewritten frame is laid out, which decides how siblings sort
///
/// **Public** - selected once at configuration time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// `name:ordinal`, siblings sort by name first (mode `0`)
    #[default]
    ByName,

    /// `ordinal:name`, siblings sort by line number first (mode `1`)
    ByOrdinal,

    /// `name` only, the ordinal is parsed and dropped (mode `2`)
    NameOnly,
}

impl SortMode {
    /// Numeric selector accepted on the command line
    pub fn selector(&self) -> &'static str {
        match self {
            SortMode::ByName => "0",
            SortMode::ByOrdinal => "1",
            SortMode::NameOnly => "2",
        }
    }
}

impl FromStr for SortMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "0" => Ok(SortMode::ByName),
            "1" => Ok(SortMode::ByOrdinal),
            "2" => Ok(SortMode::NameOnly),
            other => Err(ConfigError::InvalidSortMode(other.to_string())),
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.selector())
    }
}

/// Rewrite a single `<name>-<ordinal>` frame
///
/// **Public** - used by the normalizer for every frame of a record
///
/// # Arguments
/// * `token` - Raw frame token
/// * `mode` - Layout of the rewritten frame
///
/// # Returns
/// The rewritten frame, or `None` when the token has no numeric ordinal
/// after its last hyphen (a malformed frame)
pub fn rewrite_frame(token: &str, mode: SortMode) -> Option<String> {
    let (name, ordinal) = token.rsplit_once(ORDINAL_SEPARATOR)?;
    if ordinal.is_empty() || !ordinal.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    // "run--7" keeps a dangling separator on the name
    let name = name.strip_suffix(ORDINAL_SEPARATOR).unwrap_or(name);
    let ordinal = format!("{:0>width$}", ordinal, width = ORDINAL_WIDTH);

    let frame = match mode {
        SortMode::ByName => format!("{}:{}", name, ordinal),
        SortMode::ByOrdinal => format!("{}:{}", ordinal, name),
        SortMode::NameOnly => name.to_string(),
    };

    Some(frame.replace(ORDINAL_SEPARATOR, PATH_SEPARATOR))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_mode_from_str() {
        assert_eq!("0".parse::<SortMode>().unwrap(), SortMode::ByName);
        assert_eq!("1".parse::<SortMode>().unwrap(), SortMode::ByOrdinal);
        assert_eq!(" 2 ".parse::<SortMode>().unwrap(), SortMode::NameOnly);
        assert!("3".parse::<SortMode>().is_err());
        assert!("name".parse::<SortMode>().is_err());
    }

    #[test]
    fn test_sort_mode_display_round_trips() {
        for mode in [SortMode::ByName, SortMode::ByOrdinal, SortMode::NameOnly] {
            assert_eq!(mode.to_string().parse::<SortMode>().unwrap(), mode);
        }
    }

    #[test]
    fn test_rewrite_by_name() {
        assert_eq!(
            rewrite_frame("com-etsy-Worker-run-42", SortMode::ByName),
            Some("com.etsy.Worker.run:0042".to_string())
        );
    }

    #[test]
    fn test_rewrite_by_ordinal() {
        assert_eq!(
            rewrite_frame("Worker-run-7", SortMode::ByOrdinal),
            Some("0007:Worker.run".to_string())
        );
    }

    #[test]
    fn test_rewrite_name_only() {
        assert_eq!(
            rewrite_frame("Worker-run-7", SortMode::NameOnly),
            Some("Worker.run".to_string())
        );
    }

    #[test]
    fn test_rewrite_strips_trailing_hyphen() {
        assert_eq!(
            rewrite_frame("Worker-run--7", SortMode::ByName),
            Some("Worker.run:0007".to_string())
        );
    }

    #[test]
    fn test_rewrite_keeps_long_ordinals() {
        assert_eq!(
            rewrite_frame("main-123456", SortMode::ByName),
            Some("main:123456".to_string())
        );
    }

    #[test]
    fn test_rewrite_rejects_missing_ordinal() {
        assert_eq!(rewrite_frame("main", SortMode::ByName), None);
        assert_eq!(rewrite_frame("main-", SortMode::ByName), None);
        assert_eq!(rewrite_frame("foo-bar", SortMode::NameOnly), None);
    }
}
