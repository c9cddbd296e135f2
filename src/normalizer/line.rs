//! Turn raw input lines into normalized records.
//!
//! Input format: `frame;frame;frame [weight]`
//!
//! Example: "main;execute;storage_read 1000"
//! The key is split into frames on `;`. The optional second token is the
//! weight, read only when the normalizer is weighted. Otherwise the rest of
//! the line is ignored.

use super::record::{NormalizeStats, Record};
use super::rewrite::{rewrite_frame, SortMode};
use crate::utils::config::{DEFAULT_WEIGHT, FRAME_DELIMITER};
use crate::utils::error::ConfigError;
use log::debug;
use regex::Regex;

/// What to do with a frame that lacks the `-<ordinal>` suffix
/// while ordinal rewriting is enabled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedPolicy {
    /// Keep the frame verbatim
    #[default]
    Lenient,

    /// Drop the whole record
    Strict,
}

/// Normalizer configuration
///
/// **Public** - assembled by the commands from CLI arguments
#[derive(Debug, Clone)]
pub struct NormalizerConfig {
    /// Regex every key must match, anchored at the first character
    pub pattern: Option<String>,

    /// Prefix removed from the key before splitting (e.g. `cpu.trace.`)
    pub strip_prefix: Option<String>,

    /// Treat keys as leaf-to-root and flip them
    pub reverse: bool,

    /// Rewrite `<name>-<ordinal>` frames
    pub rewrite_ordinals: bool,

    /// Layout of rewritten frames
    pub sort_mode: SortMode,

    /// Handling of frames that cannot be rewritten
    pub malformed: MalformedPolicy,

    /// Read the second token as a weight; a bad weight drops the record
    pub weighted: bool,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            pattern: None,
            strip_prefix: None,
            reverse: false,
            rewrite_ordinals: false,
            sort_mode: SortMode::default(),
            malformed: MalformedPolicy::default(),
            weighted: true,
        }
    }
}

impl NormalizerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn with_ordinals(mut self, sort_mode: SortMode) -> Self {
        self.rewrite_ordinals = true;
        self.sort_mode = sort_mode;
        self
    }

    pub fn with_reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    pub fn with_policy(mut self, policy: MalformedPolicy) -> Self {
        self.malformed = policy;
        self
    }

    pub fn with_strip_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.strip_prefix = Some(prefix.into());
        self
    }

    pub fn with_weighted(mut self, weighted: bool) -> Self {
        self.weighted = weighted;
        self
    }
}

/// Stateful line normalizer
///
/// Owns the compiled inclusion pattern and counts what it did.
#[derive(Debug)]
pub struct Normalizer {
    config: NormalizerConfig,
    pattern: Option<Regex>,
    stats: NormalizeStats,
}

impl Normalizer {
    /// Build a normalizer, compiling the inclusion pattern
    ///
    /// # Errors
    /// * `ConfigError::InvalidPattern` - the pattern is not a valid regex
    pub fn new(config: NormalizerConfig) -> Result<Self, ConfigError> {
        let pattern = config
            .pattern
            .as_deref()
            .map(compile_anchored)
            .transpose()?;

        Ok(Self {
            config,
            pattern,
            stats: NormalizeStats::default(),
        })
    }

    /// Normalize one raw line
    ///
    /// **Public** - called once per input line
    ///
    /// # Returns
    /// A record, or `None` when the line is blank, filtered out or malformed
    pub fn normalize(&mut self, line: &str) -> Option<Record> {
        self.stats.lines_read += 1;

        let mut tokens = line.split_whitespace();
        let key = match tokens.next() {
            Some(key) => key,
            None => {
                self.stats.blank += 1;
                return None;
            }
        };

        if let Some(pattern) = &self.pattern {
            if !pattern.is_match(key) {
                self.stats.filtered += 1;
                return None;
            }
        }

        let weight = match tokens.next().filter(|_| self.config.weighted) {
            None => DEFAULT_WEIGHT,
            Some(raw) => match parse_weight(raw) {
                Some(weight) => weight,
                None => {
                    debug!("Dropping record {}: bad weight {:?}", key, raw);
                    self.stats.malformed += 1;
                    return None;
                }
            },
        };

        let key = match &self.config.strip_prefix {
            Some(prefix) => key.strip_prefix(prefix.as_str()).unwrap_or(key),
            None => key,
        };

        let mut frames: Vec<String> = key.split(FRAME_DELIMITER).map(String::from).collect();

        if self.config.reverse {
            frames.reverse();
        }

        if self.config.rewrite_ordinals {
            for frame in frames.iter_mut() {
                match rewrite_frame(frame, self.config.sort_mode) {
                    Some(rewritten) => *frame = rewritten,
                    None if self.config.malformed == MalformedPolicy::Strict => {
                        debug!("Dropping record {}: frame {:?} has no ordinal", key, frame);
                        self.stats.malformed += 1;
                        return None;
                    }
                    None => {}
                }
            }
        }

        self.stats.accepted += 1;
        Some(Record::new(frames, weight))
    }

    /// Counters accumulated so far
    pub fn stats(&self) -> &NormalizeStats {
        &self.stats
    }

    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    /// Stop reading weights; later lines keep only their key
    pub fn ignore_weights(&mut self) {
        self.config.weighted = false;
    }
}

/// Compile a pattern so that it only matches at position 0
fn compile_anchored(pattern: &str) -> Result<Regex, ConfigError> {
    Regex::new(&format!("^(?:{})", pattern)).map_err(|source| ConfigError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

/// Parse a weight token; rejects negative, NaN and infinite values
fn parse_weight(raw: &str) -> Option<f64> {
    raw.parse::<f64>()
        .ok()
        .filter(|weight| weight.is_finite() && *weight >= 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalizer(config: NormalizerConfig) -> Normalizer {
        Normalizer::new(config).unwrap()
    }

    #[test]
    fn test_default_weight() {
        let mut n = normalizer(NormalizerConfig::new());
        let record = n.normalize("main;foo").unwrap();
        assert_eq!(record.frames, vec!["main", "foo"]);
        assert_eq!(record.weight, 1.0);
    }

    #[test]
    fn test_explicit_weight_and_trailing_tokens() {
        let mut n = normalizer(NormalizerConfig::new());
        let record = n.normalize("  main;foo 2.5 ignored tail\r").unwrap();
        assert_eq!(record.frames, vec!["main", "foo"]);
        assert_eq!(record.weight, 2.5);
    }

    #[test]
    fn test_bad_weight_is_malformed() {
        let mut n = normalizer(NormalizerConfig::new());
        assert!(n.normalize("main;foo abc").is_none());
        assert!(n.normalize("main;foo -3").is_none());
        assert!(n.normalize("main;foo NaN").is_none());
        assert_eq!(n.stats().malformed, 3);
    }

    #[test]
    fn test_unweighted_ignores_remainder() {
        let mut n = normalizer(NormalizerConfig::new().with_weighted(false));
        for line in ["main;foo abc", "main;foo -3", "main;foo 1e400", "main;foo 7"] {
            let record = n.normalize(line).unwrap();
            assert_eq!(record.frames, vec!["main", "foo"]);
            assert_eq!(record.weight, 1.0);
        }
        assert_eq!(n.stats().malformed, 0);
        assert_eq!(n.stats().accepted, 4);
    }

    #[test]
    fn test_blank_line() {
        let mut n = normalizer(NormalizerConfig::new());
        assert!(n.normalize("   ").is_none());
        assert!(n.normalize("").is_none());
        assert_eq!(n.stats().blank, 2);
        assert_eq!(n.stats().skipped(), 2);
    }

    #[test]
    fn test_invalid_pattern() {
        let err = Normalizer::new(NormalizerConfig::new().with_pattern("(")).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPattern { .. }));
    }

    #[test]
    fn test_pattern_is_anchored() {
        let mut n = normalizer(NormalizerConfig::new().with_pattern("foo|bar"));
        assert!(n.normalize("barfoo;baz").is_some());
        assert!(n.normalize("bazfoo;bar").is_none());
        assert_eq!(n.stats().filtered, 1);
    }

    #[test]
    fn test_pattern_checks_key_only() {
        let mut n = normalizer(NormalizerConfig::new().with_pattern(".*5$"));
        assert!(n.normalize("main;foo 5").is_none());
        assert!(n.normalize("main;foo5 1").is_some());
    }

    #[test]
    fn test_strip_prefix() {
        let mut n = normalizer(NormalizerConfig::new().with_strip_prefix("cpu.trace."));
        let record = n.normalize("cpu.trace.main;foo 3").unwrap();
        assert_eq!(record.frames, vec!["main", "foo"]);

        let record = n.normalize("main;cpu.trace.foo").unwrap();
        assert_eq!(record.frames, vec!["main", "cpu.trace.foo"]);
    }

    #[test]
    fn test_reverse_then_rewrite() {
        let config = NormalizerConfig::new()
            .with_reverse(true)
            .with_ordinals(SortMode::ByName);
        let mut n = normalizer(config);
        let record = n.normalize("Leaf-run-3;Root-main-12").unwrap();
        assert_eq!(record.frames, vec!["Root.main:0012", "Leaf.run:0003"]);
    }

    #[test]
    fn test_lenient_keeps_unparsable_frames() {
        let mut n = normalizer(NormalizerConfig::new().with_ordinals(SortMode::NameOnly));
        let record = n.normalize("main;Worker-run-9").unwrap();
        assert_eq!(record.frames, vec!["main", "Worker.run"]);
        assert_eq!(n.stats().malformed, 0);
    }

    #[test]
    fn test_strict_drops_record() {
        let config = NormalizerConfig::new()
            .with_ordinals(SortMode::NameOnly)
            .with_policy(MalformedPolicy::Strict);
        let mut n = normalizer(config);
        assert!(n.normalize("main;Worker-run-9").is_none());
        assert!(n.normalize("main-1;Worker-run-9").is_some());
        assert_eq!(n.stats().malformed, 1);
        assert_eq!(n.stats().accepted, 1);
    }
}
