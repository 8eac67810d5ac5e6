//! The syllable rule table.
//!
//! Four ordered collections drive the estimator in [`crate::syllables`]:
//!
//! 1. `prefix_and_suffix_patterns`: affixes worth one syllable per pattern
//!    that matched, however many times it matched.
//! 2. `problem_words`: literal fragments with a fixed syllable count per
//!    occurrence, matched ASCII case-insensitively. Only the first matching
//!    entry applies.
//! 3. `add_syllable_patterns`: two syllables per occurrence.
//! 4. `subtract_syllable_patterns`: one syllable per occurrence. The name is
//!    historical; these patterns collapse several vowels into one syllable
//!    rather than removing syllables.
//!
//! Order matters within every list: each pattern sees the word as the
//! previous pattern left it.
//!
//! Rule tables are plain data. [`RuleTable::builtin`] is compiled once per
//! process; [`RuleTable::load`] reads a table from TOML, YAML or JSON.
//! `problem_words` is stored as an array of entries rather than a map so the
//! order survives formats with unordered maps.

use std::sync::LazyLock;

use aho_corasick::AhoCorasick;
use camino::Utf8Path;
use figment::Figment;
use figment::providers::{Format, Json, Toml, Yaml};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{RuleError, RuleList, RuleResult};

/// Largest syllable delta, either sign, a problem word may carry.
pub const MAX_PROBLEM_WORD_SYLLABLES: i64 = 1_000_000;

const BUILTIN_AFFIX_PATTERNS: &[&str] = &[
    "^un", "^dis", "^fore", "eria$", "ample$", "atively$", "ally$", "ely$", "ly$", "less$",
    "ful$", "ness$", "ments?$", "ers?$", "ings?$", "itions?$", "ions?$", "ical$", "ities$",
    "ity$", "ive$", "ior$", "icle$", "u(r|rg)y$", "ific$", "ia$",
];

const BUILTIN_PROBLEM_WORDS: &[(&str, i64)] = &[
    ("simile", 3),
    ("forever", 3),
    ("shoreline", 2),
    ("business", 2),
    ("people", 2),
    ("wednesday", 2),
];

const BUILTIN_ADD_PATTERNS: &[&str] =
    &["ia", "iu", "io", "ii", "eo", "[aeiou]{3}", "ism$", "uity$"];

const BUILTIN_SUBTRACT_PATTERNS: &[&str] = &[
    // surveyed, obeyed
    "[aeiouy]yed$",
    // silent e: more, defined, makes
    "[aeiouy][^aeiouydt]e[sd]?$",
    // published, concerned
    "[aeiouy][^aeiouyt]{2,}ed$",
    // vowel pairs: heavy, author, metalloids
    "[aeiouy]{2}",
];

static BUILTIN: LazyLock<RuleTable> = LazyLock::new(|| {
    RuleTable::compile(&RuleTableSource::builtin()).expect("built-in rule table compiles")
});

/// A serializable, uncompiled rule table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleTableSource {
    /// Affix patterns, credited one syllable per matching pattern.
    pub prefix_and_suffix_patterns: Vec<String>,
    /// Exception fragments with their per-occurrence syllable counts.
    pub problem_words: Vec<ProblemWordSource>,
    /// Patterns credited two syllables per occurrence.
    pub add_syllable_patterns: Vec<String>,
    /// Patterns credited one syllable per occurrence.
    pub subtract_syllable_patterns: Vec<String>,
}

/// One `problem_words` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemWordSource {
    /// Literal fragment to look for.
    pub word: String,
    /// Syllables credited per occurrence (may be negative).
    pub syllables: i64,
}

impl RuleTableSource {
    /// The table shipped with readease.
    pub fn builtin() -> Self {
        let owned =
            |list: &[&str]| -> Vec<String> { list.iter().map(|p| (*p).to_string()).collect() };
        Self {
            prefix_and_suffix_patterns: owned(BUILTIN_AFFIX_PATTERNS),
            problem_words: BUILTIN_PROBLEM_WORDS
                .iter()
                .map(|(word, syllables)| ProblemWordSource {
                    word: (*word).to_string(),
                    syllables: *syllables,
                })
                .collect(),
            add_syllable_patterns: owned(BUILTIN_ADD_PATTERNS),
            subtract_syllable_patterns: owned(BUILTIN_SUBTRACT_PATTERNS),
        }
    }
}

/// A compiled regex rule.
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Regex,
}

impl Pattern {
    /// Compile a pattern belonging to `list`.
    pub fn new(list: RuleList, source: &str) -> RuleResult<Self> {
        let regex = Regex::new(source).map_err(|e| RuleError::InvalidPattern {
            list,
            pattern: source.to_string(),
            source: Box::new(e),
        })?;
        Ok(Self { regex })
    }

    /// The pattern source text.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Remove every occurrence from `word`, returning how many were removed
    /// and what is left.
    pub fn strip(&self, word: &str) -> (usize, String) {
        let count = self.regex.find_iter(word).count();
        if count == 0 {
            return (0, word.to_string());
        }
        (count, self.regex.replace_all(word, "").into_owned())
    }
}

/// A compiled `problem_words` entry.
#[derive(Debug, Clone)]
pub struct ProblemWord {
    word: String,
    syllables: i64,
    matcher: AhoCorasick,
}

impl ProblemWord {
    /// Build an entry matching `word` ASCII case-insensitively.
    pub fn new(word: &str, syllables: i64) -> RuleResult<Self> {
        let invalid = |source: Box<dyn std::error::Error + Send + Sync>| {
            RuleError::InvalidPattern {
                list: RuleList::ProblemWords,
                pattern: word.to_string(),
                source,
            }
        };
        if word.is_empty() {
            return Err(invalid("problem word must not be empty".into()));
        }
        if syllables.unsigned_abs() > MAX_PROBLEM_WORD_SYLLABLES.unsigned_abs() {
            return Err(invalid(
                format!(
                    "syllable delta {syllables} is outside \
                     -{MAX_PROBLEM_WORD_SYLLABLES}..={MAX_PROBLEM_WORD_SYLLABLES}"
                )
                .into(),
            ));
        }
        let matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build([word])
            .map_err(|e| invalid(e.into()))?;
        Ok(Self {
            word: word.to_string(),
            syllables,
            matcher,
        })
    }

    /// The literal fragment.
    pub fn word(&self) -> &str {
        &self.word
    }

    /// Syllables credited per occurrence.
    pub const fn syllables(&self) -> i64 {
        self.syllables
    }

    /// Remove every occurrence from `word`, returning how many were removed
    /// and what is left.
    pub fn strip(&self, word: &str) -> (usize, String) {
        let count = self.matcher.find_iter(word).count();
        if count == 0 {
            return (0, word.to_string());
        }
        (count, self.matcher.replace_all(word, &[""]))
    }
}

/// Number of entries in each rule list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RuleTableSizes {
    /// `prefix_and_suffix_patterns`
    pub prefix_and_suffix_patterns: usize,
    /// `problem_words`
    pub problem_words: usize,
    /// `add_syllable_patterns`
    pub add_syllable_patterns: usize,
    /// `subtract_syllable_patterns`
    pub subtract_syllable_patterns: usize,
}

/// A compiled, read-only rule table.
#[derive(Debug, Clone)]
pub struct RuleTable {
    affix: Vec<Pattern>,
    problem_words: Vec<ProblemWord>,
    add: Vec<Pattern>,
    subtract: Vec<Pattern>,
}

impl RuleTable {
    /// The built-in table, compiled on first use and shared.
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    /// Compile every pattern in `source`, preserving list order.
    pub fn compile(source: &RuleTableSource) -> RuleResult<Self> {
        let patterns = |list: RuleList, sources: &[String]| {
            sources
                .iter()
                .map(|p| Pattern::new(list, p))
                .collect::<RuleResult<Vec<_>>>()
        };
        let problem_words = source
            .problem_words
            .iter()
            .map(|entry| ProblemWord::new(&entry.word, entry.syllables))
            .collect::<RuleResult<Vec<_>>>()?;

        Ok(Self {
            affix: patterns(RuleList::Affix, &source.prefix_and_suffix_patterns)?,
            problem_words,
            add: patterns(RuleList::Add, &source.add_syllable_patterns)?,
            subtract: patterns(RuleList::Subtract, &source.subtract_syllable_patterns)?,
        })
    }

    /// Load and compile a rule table file.
    ///
    /// The format follows the extension (`toml`, `yaml`/`yml`, `json`);
    /// anything else is read as TOML. Lists missing from the file are empty.
    #[tracing::instrument(skip_all, fields(path = %path))]
    pub fn load(path: &Utf8Path) -> RuleResult<Self> {
        if !path.is_file() {
            return Err(RuleError::NotFound(path.to_path_buf()));
        }
        let figment = match path.extension() {
            Some("yaml" | "yml") => Figment::from(Yaml::file_exact(path.as_str())),
            Some("json") => Figment::from(Json::file_exact(path.as_str())),
            _ => Figment::from(Toml::file_exact(path.as_str())),
        };
        let source: RuleTableSource = figment.extract().map_err(Box::new)?;
        let table = Self::compile(&source)?;
        tracing::debug!(sizes = ?table.sizes(), "rule table loaded");
        Ok(table)
    }

    /// Affix patterns, in application order.
    pub fn affix_patterns(&self) -> &[Pattern] {
        &self.affix
    }

    /// Problem words, in lookup order.
    pub fn problem_words(&self) -> &[ProblemWord] {
        &self.problem_words
    }

    /// Two-syllable patterns, in application order.
    pub fn add_patterns(&self) -> &[Pattern] {
        &self.add
    }

    /// One-syllable patterns, in application order.
    pub fn subtract_patterns(&self) -> &[Pattern] {
        &self.subtract
    }

    /// Entry count of each list.
    pub const fn sizes(&self) -> RuleTableSizes {
        RuleTableSizes {
            prefix_and_suffix_patterns: self.affix.len(),
            problem_words: self.problem_words.len(),
            add_syllable_patterns: self.add.len(),
            subtract_syllable_patterns: self.subtract.len(),
        }
    }

    /// Convert back to the serializable form.
    pub fn to_source(&self) -> RuleTableSource {
        let sources = |list: &[Pattern]| -> Vec<String> {
            list.iter().map(|p| p.as_str().to_string()).collect()
        };
        RuleTableSource {
            prefix_and_suffix_patterns: sources(&self.affix),
            problem_words: self
                .problem_words
                .iter()
                .map(|p| ProblemWordSource {
                    word: p.word.clone(),
                    syllables: p.syllables,
                })
                .collect(),
            add_syllable_patterns: sources(&self.add),
            subtract_syllable_patterns: sources(&self.subtract),
        }
    }
}
