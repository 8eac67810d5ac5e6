//! Rule-based syllable estimation.
//!
//! Each word goes through five steps, and every step sees only what the
//! previous one left behind:
//!
//! 1. affix pass: one syllable per affix pattern that matched
//! 2. exception pass: the first matching problem word, per occurrence
//! 3. addition pass: two syllables per occurrence
//! 4. subtraction pass: one syllable per occurrence
//! 5. vowel fallback: one syllable per remaining vowel character
//!
//! Matched text is removed as it is credited, so later rules never count
//! the same letters again. This is a heuristic, not a pronunciation model.

use serde::Serialize;

use crate::rule_table::{Pattern, RuleTable};

/// Characters counted by the vowel fallback (ASCII case-insensitive).
const VOWELS: &[u8] = b"aeiouy";

/// One estimation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Pass {
    /// `prefix_and_suffix_patterns`
    Affix,
    /// `problem_words`
    Exception,
    /// `add_syllable_patterns`
    Addition,
    /// `subtract_syllable_patterns`
    Subtraction,
    /// Remaining vowels.
    VowelFallback,
}

impl Pass {
    /// All passes in application order.
    pub const ALL: [Self; 5] = [
        Self::Affix,
        Self::Exception,
        Self::Addition,
        Self::Subtraction,
        Self::VowelFallback,
    ];

    /// Short human-readable name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Affix => "affix",
            Self::Exception => "exception",
            Self::Addition => "addition",
            Self::Subtraction => "subtraction",
            Self::VowelFallback => "vowel fallback",
        }
    }

    /// Apply this pass to `word`.
    pub fn apply(self, word: &str, rules: &RuleTable) -> PassOutcome {
        match self {
            Self::Affix => affix_pass(word, rules),
            Self::Exception => exception_pass(word, rules),
            Self::Addition => addition_pass(word, rules),
            Self::Subtraction => subtraction_pass(word, rules),
            Self::VowelFallback => vowel_fallback(word),
        }
    }
}

/// Syllables credited by one pass and the text it left behind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PassOutcome {
    /// Syllables credited.
    pub delta: i64,
    /// Residual word handed to the next pass.
    pub residual: String,
}

/// Final estimate for one word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyllableEstimate {
    /// Total syllables credited.
    pub syllables: i64,
    /// What the pattern passes left for the vowel fallback.
    pub residual: String,
}

/// One recorded step of a [`SyllableTrace`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraceStep {
    /// Which pass ran.
    pub pass: Pass,
    /// Its outcome.
    #[serde(flatten)]
    pub outcome: PassOutcome,
}

/// Pass-by-pass record of an estimate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyllableTrace {
    /// The word as given.
    pub word: String,
    /// Steps in application order.
    pub steps: Vec<TraceStep>,
    /// Sum of all step deltas.
    pub syllables: i64,
}

/// Estimate the syllables in `word`.
pub fn estimate_syllables(word: &str, rules: &RuleTable) -> SyllableEstimate {
    let mut syllables = 0;
    let mut residual = word.to_string();
    for pass in Pass::ALL {
        let outcome = pass.apply(&residual, rules);
        syllables = i64::saturating_add(syllables, outcome.delta);
        residual = outcome.residual;
    }
    tracing::trace!(word, syllables, "estimated syllables");
    SyllableEstimate {
        syllables,
        residual,
    }
}

/// Estimate the syllables in `word`, recording every pass.
pub fn trace_syllables(word: &str, rules: &RuleTable) -> SyllableTrace {
    let mut steps = Vec::with_capacity(Pass::ALL.len());
    let mut residual = word.to_string();
    for pass in Pass::ALL {
        let outcome = pass.apply(&residual, rules);
        residual.clone_from(&outcome.residual);
        steps.push(TraceStep { pass, outcome });
    }
    SyllableTrace {
        word: word.to_string(),
        syllables: steps
            .iter()
            .fold(0, |total, s| i64::saturating_add(total, s.outcome.delta)),
        steps,
    }
}

/// One syllable for every affix pattern that matched, however often.
pub fn affix_pass(word: &str, rules: &RuleTable) -> PassOutcome {
    let mut delta = 0;
    let mut residual = word.to_string();
    for pattern in rules.affix_patterns() {
        let (count, stripped) = pattern.strip(&residual);
        if count > 0 {
            delta += 1;
        }
        residual = stripped;
    }
    PassOutcome { delta, residual }
}

/// The first problem word found, credited per occurrence.
pub fn exception_pass(word: &str, rules: &RuleTable) -> PassOutcome {
    for entry in rules.problem_words() {
        let (count, stripped) = entry.strip(word);
        if count > 0 {
            return PassOutcome {
                delta: entry.syllables().saturating_mul(occurrences(count)),
                residual: stripped,
            };
        }
    }
    PassOutcome {
        delta: 0,
        residual: word.to_string(),
    }
}

/// Two syllables per occurrence of each add pattern.
pub fn addition_pass(word: &str, rules: &RuleTable) -> PassOutcome {
    per_occurrence(word, rules.add_patterns(), 2)
}

/// One syllable per occurrence of each subtract pattern.
pub fn subtraction_pass(word: &str, rules: &RuleTable) -> PassOutcome {
    per_occurrence(word, rules.subtract_patterns(), 1)
}

/// One syllable per vowel character left in `word`. Nothing is removed.
pub fn vowel_fallback(word: &str) -> PassOutcome {
    let vowels = word
        .bytes()
        .filter(|b| VOWELS.contains(&b.to_ascii_lowercase()))
        .count();
    PassOutcome {
        delta: vowels as i64,
        residual: word.to_string(),
    }
}

fn occurrences(count: usize) -> i64 {
    i64::try_from(count).unwrap_or(i64::MAX)
}

fn per_occurrence(word: &str, patterns: &[Pattern], weight: i64) -> PassOutcome {
    let mut delta = 0;
    let mut residual = word.to_string();
    for pattern in patterns {
        let (count, stripped) = pattern.strip(&residual);
        delta = i64::saturating_add(delta, weight.saturating_mul(occurrences(count)));
        residual = stripped;
    }
    PassOutcome { delta, residual }
}
