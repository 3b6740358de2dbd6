// src/analyze/matchers.rs
//! Keyword and phrase matching over the extracted token sequence.
//!
//! Matching is case-insensitive and word-boundary exact: a multi-word phrase
//! matches only where its words appear contiguously within one sentence. Every
//! occurrence produces its own `KeywordMatch`, so repeated phrases weigh in
//! repeatedly. No fuzzy matching; paraphrases are accepted false negatives.

use serde::Serialize;

use crate::analyze::features::{tokenize_words, FeatureSet};
use crate::config::EngineConfig;

/// Which vocabulary produced a match. Red-flag sub-categories stay distinct so
/// explanations can cite where a signal came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalCategory {
    RealTime,
    Evergreen,
    Conspiracy,
    AbsoluteClaim,
    Urgency,
    Clickbait,
    AntiEstablishment,
    MiracleCure,
}

impl SignalCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalCategory::RealTime => "real_time",
            SignalCategory::Evergreen => "evergreen",
            SignalCategory::Conspiracy => "conspiracy",
            SignalCategory::AbsoluteClaim => "absolute_claim",
            SignalCategory::Urgency => "urgency",
            SignalCategory::Clickbait => "clickbait",
            SignalCategory::AntiEstablishment => "anti_establishment",
            SignalCategory::MiracleCure => "miracle_cure",
        }
    }
}

/// One occurrence of a configured term in the input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeywordMatch {
    pub category: SignalCategory,
    pub term: String,
    pub weight: f32,
}

/// Count occurrences of `words` as a contiguous run in the token sequence.
/// Runs never cross a sentence boundary.
fn occurrences(features: &FeatureSet, words: &[String]) -> usize {
    if words.is_empty() || features.tokens.len() < words.len() {
        return 0;
    }
    let toks = &features.tokens;
    let mut count = 0;
    for start in 0..=(toks.len() - words.len()) {
        let sentence = toks[start].sentence;
        let hit = words
            .iter()
            .enumerate()
            .all(|(i, w)| toks[start + i].sentence == sentence && toks[start + i].lower == *w);
        if hit {
            count += 1;
        }
    }
    count
}

/// Match every term of one vocabulary, one `KeywordMatch` per occurrence.
pub fn match_terms(
    features: &FeatureSet,
    terms: &[String],
    category: SignalCategory,
    weight: f32,
) -> Vec<KeywordMatch> {
    let mut out = Vec::new();
    for term in terms {
        let words = tokenize_words(term);
        for _ in 0..occurrences(features, &words) {
            out.push(KeywordMatch {
                category,
                term: term.clone(),
                weight,
            });
        }
    }
    out
}

/// Total occurrence count across a term list, without building matches.
/// Used by the domain detector, which only needs counts.
pub(crate) fn total_occurrences(features: &FeatureSet, terms: &[String]) -> usize {
    terms
        .iter()
        .map(|t| occurrences(features, &tokenize_words(t)))
        .sum()
}

pub fn match_real_time(cfg: &EngineConfig, features: &FeatureSet) -> Vec<KeywordMatch> {
    match_terms(
        features,
        &cfg.vocabulary.real_time,
        SignalCategory::RealTime,
        cfg.classifier.real_time_term_weight,
    )
}

pub fn match_evergreen(cfg: &EngineConfig, features: &FeatureSet) -> Vec<KeywordMatch> {
    match_terms(
        features,
        &cfg.vocabulary.evergreen,
        SignalCategory::Evergreen,
        cfg.classifier.evergreen_term_weight,
    )
}

/// Match all six red-flag sub-categories with their configured weights.
pub fn match_red_flags(cfg: &EngineConfig, features: &FeatureSet) -> Vec<KeywordMatch> {
    let v = &cfg.vocabulary.red_flags;
    let w = &cfg.risk.weights;
    let mut out = Vec::new();
    for (terms, category, weight) in [
        (&v.conspiracy, SignalCategory::Conspiracy, w.conspiracy),
        (&v.absolute_claim, SignalCategory::AbsoluteClaim, w.absolute_claim),
        (&v.urgency, SignalCategory::Urgency, w.urgency),
        (&v.clickbait, SignalCategory::Clickbait, w.clickbait),
        (
            &v.anti_establishment,
            SignalCategory::AntiEstablishment,
            w.anti_establishment,
        ),
        (&v.miracle_cure, SignalCategory::MiracleCure, w.miracle_cure),
    ] {
        out.extend(match_terms(features, terms, category, weight));
    }
    out
}
