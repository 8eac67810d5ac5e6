//! Core library for readease.
//!
//! Computes the Flesch Reading Ease score of a text. Sentences and words come
//! from two delimiter-based splitters; syllables are estimated per word by an
//! ordered set of regex passes from a [`RuleTable`], with a vowel-counting
//! fallback for whatever the passes leave behind.
//!
//! # Modules
//!
//! - [`segment`] - Sentence and word splitting
//! - [`rule_table`] - Rule-table data, built-in table and file loading
//! - [`syllables`] - Rule-based syllable estimation
//! - [`readability`] - Flesch Reading Ease calculator
//! - [`markdown`] - Markdown to prose conversion
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```
//! use readease_core::{ScoreOutcome, compute_score};
//!
//! assert_eq!(compute_score("Cat."), ScoreOutcome::Score(121));
//! assert_eq!(compute_score("").to_string(), "Empty string");
//! ```
//!
//! With a custom rule table and the full report:
//!
//! ```no_run
//! use camino::Utf8Path;
//! use readease_core::{RuleTable, Scorer};
//!
//! let rules = RuleTable::load(Utf8Path::new("rules.toml")).unwrap();
//! let report = Scorer::new(&rules).score("The cat sat on the mat.").unwrap();
//! println!("{} ({} syllables)", report.score, report.syllables);
//! ```
#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod markdown;
pub mod readability;
pub mod rule_table;
pub mod segment;
pub mod syllables;

pub use config::{Config, ConfigLoader, ConfigSources, LogLevel};
pub use error::{
    ConfigError, ConfigResult, RuleError, RuleList, RuleResult, ScoreError, ScoreResult,
    SegmentKind,
};
pub use readability::{ReadingEase, ScoreOutcome, Scorer, compute_score, ease_score, round_score};
pub use rule_table::{MAX_PROBLEM_WORD_SYLLABLES, RuleTable, RuleTableSizes, RuleTableSource};
pub use syllables::{SyllableEstimate, SyllableTrace, estimate_syllables, trace_syllables};

/// Default maximum input size: 5 MiB.
pub const DEFAULT_MAX_INPUT_BYTES: usize = 5 * 1024 * 1024;
