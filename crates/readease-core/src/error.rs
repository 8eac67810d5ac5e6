//! Error types for readease-core.

use std::fmt;

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Which of the four rule lists a pattern belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleList {
    /// `prefix_and_suffix_patterns`
    Affix,
    /// `problem_words`
    ProblemWords,
    /// `add_syllable_patterns`
    Add,
    /// `subtract_syllable_patterns`
    Subtract,
}

impl RuleList {
    /// Returns the list's field name as it appears in rule-table files.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Affix => "prefix_and_suffix_patterns",
            Self::ProblemWords => "problem_words",
            Self::Add => "add_syllable_patterns",
            Self::Subtract => "subtract_syllable_patterns",
        }
    }
}

impl fmt::Display for RuleList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur while building a rule table.
#[derive(Error, Debug)]
pub enum RuleError {
    /// A pattern failed to compile.
    #[error("invalid pattern `{pattern}` in {list}: {source}")]
    InvalidPattern {
        /// The list the pattern came from.
        list: RuleList,
        /// The pattern source text.
        pattern: String,
        /// The underlying compile error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The rule-table file does not exist.
    #[error("rule table not found: {0}")]
    NotFound(Utf8PathBuf),

    /// A rule-table file could not be read or deserialized.
    #[error("failed to load rule table: {0}")]
    Load(#[from] Box<figment::Error>),
}

/// Result type alias using [`RuleError`].
pub type RuleResult<T> = Result<T, RuleError>;

/// Which splitting rule failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// Splitting into sentences.
    Sentences,
    /// Splitting into words.
    Words,
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sentences => f.write_str("sentences"),
            Self::Words => f.write_str("words"),
        }
    }
}

/// Errors that can occur while scoring a text.
///
/// The display strings are the user-facing failure messages returned in
/// place of a score.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreError {
    /// The input text has zero length.
    #[error("Empty string")]
    EmptyInput,

    /// A splitter produced no segments at all.
    #[error("Error split text to {0}!")]
    Segmentation(SegmentKind),

    /// No sentences or no words to average over.
    #[error("A non-correct string was entered!")]
    Division,
}

/// Result type alias using [`ScoreError`].
pub type ScoreResult<T> = Result<T, ScoreError>;
