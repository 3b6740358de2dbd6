// src/analyze/features.rs
//! Feature extraction: tokens, sentences, entities, time references, and
//! plain aggregates. One `FeatureSet` is built per request and never mutated.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

// \w covers [A-Za-z0-9_]; (?u) enables Unicode
static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?u)\b\w+\b").expect("tokenizer regex"));

// Absolute timestamp shapes: wall-clock (optionally with AM/PM) and ISO-like dates.
static CLOCK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b\d{1,2}:\d{2}(?:\s?(?:am|pm))?\b").expect("clock regex"));
static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\d{4}-\d{2}-\d{2}\b").expect("date regex"));

// Relative time phrases. Longer alternatives first so "earlier today" is one hit.
static RELATIVE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(right now|just now|moments ago|earlier today|last night|this (?:week|morning|afternoon|evening)|today|tonight|yesterday|tomorrow)\b",
    )
    .expect("relative time regex")
});

/// A single word token. The lowercased form drives matching; the original form
/// feeds the entity heuristic.
#[derive(Debug, Clone)]
pub struct Token {
    pub lower: String,
    pub original: String,
    /// 0-based index of the sentence this token belongs to.
    pub sentence: usize,
}

/// Read-only signals extracted from one input text.
#[derive(Debug, Clone)]
pub struct FeatureSet {
    pub tokens: Vec<Token>,
    pub sentences: Vec<String>,
    /// Capitalized non-sentence-initial words plus numeric tokens.
    pub entities: BTreeSet<String>,
    /// Distinct time-reference hits (lowercased), in order of first occurrence.
    pub time_hits: Vec<String>,
    pub word_count: usize,
    pub sentence_count: usize,
    pub avg_sentence_len: f32,
}

/// Lowercased word sequence for an arbitrary string, using the same tokenizer
/// as `extract`. Vocabulary phrases go through this so phrase matching and
/// text tokenization can never disagree.
pub(crate) fn tokenize_words(s: &str) -> Vec<String> {
    WORD_RE
        .find_iter(s)
        .map(|m| m.as_str().to_lowercase())
        .collect()
}

/// Build the `FeatureSet` for one text. Never fails: a text with no
/// recognizable words yields empty sets and zero counts.
pub fn extract(text: &str) -> FeatureSet {
    // Only word-bearing fragments count as sentences; bare punctuation runs do not.
    let sentences: Vec<String> = text
        .split(|c: char| matches!(c, '.' | '!' | '?'))
        .map(str::trim)
        .filter(|s| WORD_RE.is_match(s))
        .map(str::to_string)
        .collect();

    let mut tokens = Vec::new();
    let mut entities = BTreeSet::new();

    for (si, sentence) in sentences.iter().enumerate() {
        for (wi, m) in WORD_RE.find_iter(sentence).enumerate() {
            let original = m.as_str().to_string();

            if original.chars().all(|c| c.is_ascii_digit()) {
                entities.insert(original.clone());
            } else if wi > 0 && original.chars().count() > 1 {
                // Sentence-initial words are excluded to cut false positives.
                if original.chars().next().is_some_and(|c| c.is_uppercase()) {
                    entities.insert(original.clone());
                }
            }

            tokens.push(Token {
                lower: original.to_lowercase(),
                original,
                sentence: si,
            });
        }
    }

    let mut time_hits = Vec::new();
    let mut seen = BTreeSet::new();
    for re in [&*RELATIVE_RE, &*CLOCK_RE, &*DATE_RE] {
        for m in re.find_iter(text) {
            let hit = m.as_str().to_lowercase();
            if seen.insert(hit.clone()) {
                time_hits.push(hit);
            }
        }
    }

    let word_count = tokens.len();
    let sentence_count = sentences.len();
    let avg_sentence_len = if sentence_count > 0 {
        word_count as f32 / sentence_count as f32
    } else {
        0.0
    };

    FeatureSet {
        tokens,
        sentences,
        entities,
        time_hits,
        word_count,
        sentence_count,
        avg_sentence_len,
    }
}
