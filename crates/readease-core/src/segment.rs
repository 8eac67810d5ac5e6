//! Delimiter-based text segmentation.
//!
//! Sentences and words come from two independent splitting rules. Both
//! splitters are total: a text that never matches the delimiter pattern is
//! returned whole as a single segment, and blank segments are kept so the
//! caller decides what counts.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{ScoreError, ScoreResult, SegmentKind};

/// Sentence delimiters: `( . ! : ; )`, one or more in sequence.
static SENTENCE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[(.!:;)]+").expect("valid regex"));

/// Word delimiters: `( . , ! : ; ) ?` and ASCII whitespace, one or more in
/// sequence. Non-breaking and other Unicode spaces stay inside words.
static WORD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[(.,!:;)?\t\n\x0B\x0C\r ]+").expect("valid regex"));

/// Characters trimmed before a segment is judged blank.
const BLANK: [char; 6] = [' ', '\t', '\n', '\r', '\0', '\x0B'];

/// Split text into sentence segments.
///
/// Note that `?` is not a sentence delimiter.
#[tracing::instrument(skip_all, fields(text_len = text.len()))]
pub fn split_sentences(text: &str) -> ScoreResult<Vec<&str>> {
    split_with(&SENTENCE_PATTERN, text, SegmentKind::Sentences)
}

/// Split text into word segments.
#[tracing::instrument(skip_all, fields(text_len = text.len()))]
pub fn split_words(text: &str) -> ScoreResult<Vec<&str>> {
    split_with(&WORD_PATTERN, text, SegmentKind::Words)
}

/// Count segments that are non-empty after trimming.
pub fn count_segments(segments: &[&str]) -> usize {
    segments
        .iter()
        .filter(|s| !s.trim_matches(BLANK).is_empty())
        .count()
}

fn split_with<'t>(pattern: &Regex, text: &'t str, kind: SegmentKind) -> ScoreResult<Vec<&'t str>> {
    let segments: Vec<&str> = pattern.split(text).collect();
    if segments.is_empty() {
        return Err(ScoreError::Segmentation(kind));
    }
    tracing::trace!(%kind, segments = segments.len(), "split text");
    Ok(segments)
}
