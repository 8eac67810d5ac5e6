//! Readability scoring using Flesch Reading Ease.
//!
//! Formula: `206.835 - 1.015 * (words/sentences) - 84.6 * (syllables/words)`
//!
//! Higher score = easier text. Plain prose usually lands between 0 and 100,
//! but the formula is unbounded in both directions.
//!
//! Sentences and words come from [`segment`], syllables from the rule-based
//! estimator in [`syllables`]. The final score is rounded to the nearest
//! integer with ties away from zero.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::{ScoreError, ScoreResult};
use crate::rule_table::RuleTable;
use crate::segment;
use crate::syllables;

const BASE: f64 = 206.835;
const SENTENCE_LENGTH_WEIGHT: f64 = 1.015;
const SYLLABLE_WEIGHT: f64 = 84.6;

/// Running counts for one scoring call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counters {
    /// Non-blank sentence segments.
    pub sentences: usize,
    /// Non-blank word segments.
    pub words: usize,
    /// Estimated syllables across every word segment.
    pub syllables: i64,
}

impl Counters {
    /// Average sentence length: words per sentence.
    pub fn asl(&self) -> ScoreResult<f64> {
        if self.sentences == 0 {
            return Err(ScoreError::Division);
        }
        Ok(self.words as f64 / self.sentences as f64)
    }

    /// Average syllables per word.
    pub fn asw(&self) -> ScoreResult<f64> {
        if self.words == 0 {
            return Err(ScoreError::Division);
        }
        Ok(self.syllables as f64 / self.words as f64)
    }
}

/// Result of readability analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadingEase {
    /// Flesch Reading Ease, rounded.
    pub score: i64,
    /// Flesch Reading Ease before rounding.
    pub raw_score: f64,
    /// Number of sentences detected.
    pub sentences: usize,
    /// Number of words detected.
    pub words: usize,
    /// Total syllable estimate.
    pub syllables: i64,
    /// Average sentence length.
    pub asl: f64,
    /// Average syllables per word.
    pub asw: f64,
}

/// Scores texts against one rule table.
///
/// Each call builds its own [`Counters`], so a `Scorer` can be shared
/// between threads.
#[derive(Debug, Clone, Copy)]
pub struct Scorer<'r> {
    rules: &'r RuleTable,
}

impl Default for Scorer<'static> {
    fn default() -> Self {
        Self::new(RuleTable::builtin())
    }
}

impl<'r> Scorer<'r> {
    /// Create a scorer over `rules`.
    pub const fn new(rules: &'r RuleTable) -> Self {
        Self { rules }
    }

    /// Count sentences, words and syllables in `text`.
    pub fn count(&self, text: &str) -> ScoreResult<Counters> {
        let sentences = segment::split_sentences(text)?;
        let words = segment::split_words(text)?;

        let syllables = words
            .iter()
            .map(|word| syllables::estimate_syllables(word, self.rules).syllables)
            .fold(0, i64::saturating_add);

        Ok(Counters {
            sentences: segment::count_segments(&sentences),
            words: segment::count_segments(&words),
            syllables,
        })
    }

    /// Score `text`.
    #[tracing::instrument(skip_all, fields(text_len = text.len()))]
    pub fn score(&self, text: &str) -> ScoreResult<ReadingEase> {
        if text.is_empty() {
            return Err(ScoreError::EmptyInput);
        }

        let counters = self.count(text)?;
        let asl = counters.asl()?;
        let asw = counters.asw()?;
        let raw_score = SYLLABLE_WEIGHT.mul_add(-asw, SENTENCE_LENGTH_WEIGHT.mul_add(-asl, BASE));

        tracing::debug!(
            sentences = counters.sentences,
            words = counters.words,
            syllables = counters.syllables,
            raw_score,
            "scored text"
        );

        Ok(ReadingEase {
            score: round_score(raw_score),
            raw_score,
            sentences: counters.sentences,
            words: counters.words,
            syllables: counters.syllables,
            asl,
            asw,
        })
    }
}

/// Round to the nearest integer, ties away from zero.
pub fn round_score(score: f64) -> i64 {
    score.round() as i64
}

/// A score, or the message explaining why there is none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoreOutcome {
    /// Rounded Flesch Reading Ease.
    Score(i64),
    /// Failure message.
    Message(String),
}

impl ScoreOutcome {
    /// The score, if there is one.
    pub const fn score(&self) -> Option<i64> {
        match self {
            Self::Score(score) => Some(*score),
            Self::Message(_) => None,
        }
    }
}

impl From<ScoreResult<ReadingEase>> for ScoreOutcome {
    fn from(result: ScoreResult<ReadingEase>) -> Self {
        match result {
            Ok(report) => Self::Score(report.score),
            Err(err) => Self::Message(err.to_string()),
        }
    }
}

impl fmt::Display for ScoreOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Score(score) => write!(f, "{score}"),
            Self::Message(message) => f.write_str(message),
        }
    }
}

impl Serialize for ScoreOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Score(score) => serializer.serialize_i64(*score),
            Self::Message(message) => serializer.serialize_str(message),
        }
    }
}

/// Score `text` against `rules`, collapsing any failure to its message.
pub fn ease_score(text: &str, rules: &RuleTable) -> ScoreOutcome {
    Scorer::new(rules).score(text).into()
}

/// Score `text` with the built-in rule table.
pub fn compute_score(text: &str) -> ScoreOutcome {
    ease_score(text, RuleTable::builtin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule_table::RuleTableSource;

    const HEAVY_METALS: &str = "Heavy metals are generally defined as metals with relatively \
        high densities, atomic weights, or atomic numbers. The criteria used, and whether \
        metalloids are included, vary depending on the author and context. In metallurgy, for \
        example, a heavy metal may be defined on the basis of density, whereas in physics the \
        distinguishing criterion might be atomic number, while a chemist would likely be more \
        concerned with chemical behavior. More specific definitions have been published, but \
        none of these have been widely accepted. The definitions surveyed in this article \
        encompass up to 96 out of the 118 chemical elements; only mercury, lead and bismuth \
        meet all of them.";

    #[test]
    fn heavy_metals_golden_score() {
        let report = Scorer::default().score(HEAVY_METALS).unwrap();
        assert_eq!(report.sentences, 6);
        assert_eq!(report.words, 106);
        assert_eq!(report.syllables, 170);
        assert_eq!(report.score, 53);
        assert_eq!(compute_score(HEAVY_METALS), ScoreOutcome::Score(53));
    }

    #[test]
    fn single_word_sentence() {
        let report = Scorer::default().score("Cat.").unwrap();
        assert_eq!(report.sentences, 1);
        assert_eq!(report.words, 1);
        assert_eq!(report.syllables, 1);
        assert!((report.asl - 1.0).abs() < f64::EPSILON);
        assert!((report.asw - 1.0).abs() < f64::EPSILON);
        assert!((report.raw_score - 121.22).abs() < 1e-9);
        assert_eq!(report.score, 121);
    }

    #[test]
    fn empty_string() {
        assert_eq!(
            compute_score(""),
            ScoreOutcome::Message("Empty string".to_string())
        );
        assert_eq!(
            Scorer::default().score("").unwrap_err(),
            ScoreError::EmptyInput
        );
    }

    #[test]
    fn lone_delimiter_is_a_division_error() {
        assert_eq!(
            compute_score("."),
            ScoreOutcome::Message("A non-correct string was entered!".to_string())
        );
        let counters = Scorer::default().count(".").unwrap();
        assert_eq!(counters.words, 0);
    }

    #[test]
    fn whitespace_only_is_not_empty() {
        assert_eq!(
            Scorer::default().score("   ").unwrap_err(),
            ScoreError::Division
        );
    }

    #[test]
    fn text_without_terminator_is_one_sentence() {
        let report = Scorer::default().score("Hello world").unwrap();
        assert_eq!(report.sentences, 1);
        assert_eq!(report.words, 2);
        assert_eq!(report.score, 78);
    }

    #[test]
    fn question_mark_splits_words_not_sentences() {
        let report = Scorer::default().score("Is it? Yes.").unwrap();
        assert_eq!(report.sentences, 1);
        assert_eq!(report.words, 3);
        assert_eq!(report.score, 91);
    }

    #[test]
    fn simple_sentences_score_high() {
        assert_eq!(
            compute_score("The cat sat on the mat. The dog ran fast."),
            ScoreOutcome::Score(117)
        );
    }

    #[test]
    fn terminated_text_always_scores() {
        for text in ["A b.", "Go!", "One; two: three.", "(Aside) text."] {
            assert!(compute_score(text).score().is_some(), "{text:?}");
        }
    }

    #[test]
    fn counters_guard_division() {
        let counters = Counters::default();
        assert_eq!(counters.asl(), Err(ScoreError::Division));
        assert_eq!(counters.asw(), Err(ScoreError::Division));

        let counters = Counters {
            sentences: 2,
            words: 10,
            syllables: 15,
        };
        assert!((counters.asl().unwrap() - 5.0).abs() < f64::EPSILON);
        assert!((counters.asw().unwrap() - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn rounding_ties_away_from_zero() {
        assert_eq!(round_score(52.5), 53);
        assert_eq!(round_score(53.49), 53);
        assert_eq!(round_score(-0.5), -1);
        assert_eq!(round_score(-12.4), -12);
        assert_eq!(round_score(121.22), 121);
    }

    #[test]
    fn custom_rules_change_the_score() {
        let empty = RuleTable::compile(&RuleTableSource::default()).unwrap();
        // Without rules every vowel counts: 3 + 2 + 2 + 1 = 8 syllables.
        let report = Scorer::new(&empty).score("Heavy metals are old.").unwrap();
        assert_eq!(report.syllables, 8);
        let builtin = Scorer::default().score("Heavy metals are old.").unwrap();
        assert!(builtin.syllables < report.syllables);
    }

    #[test]
    fn outcome_display_and_json() {
        assert_eq!(ScoreOutcome::Score(-7).to_string(), "-7");
        assert_eq!(
            serde_json::to_string(&compute_score("Cat.")).unwrap(),
            "121"
        );
        assert_eq!(
            serde_json::to_string(&compute_score("")).unwrap(),
            "\"Empty string\""
        );
    }

    #[test]
    fn scoring_calls_do_not_share_state() {
        let scorer = Scorer::default();
        let first = scorer.score(HEAVY_METALS).unwrap();
        let second = scorer.score(HEAVY_METALS).unwrap();
        assert_eq!(first, second);

        let results: Vec<ScoreOutcome> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..4)
                .map(|_| s.spawn(|| ease_score(HEAVY_METALS, RuleTable::builtin())))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert!(results.iter().all(|r| *r == ScoreOutcome::Score(53)));
    }
}
