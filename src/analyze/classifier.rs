// src/analyze/classifier.rs
//! Content-type classifier: real-time vs. evergreen.
//! Pure function over the feature set and matcher output; no I/O, no state.

use serde::{Deserialize, Serialize};

use crate::analyze::features::FeatureSet;
use crate::analyze::matchers::KeywordMatch;
use crate::config::{ClassifierCfg, TieBreak};

/// Guards the confidence division when both scores are zero.
const CONFIDENCE_EPSILON: f32 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Label {
    RealTime,
    Evergreen,
}

impl Label {
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::RealTime => "real_time",
            Label::Evergreen => "evergreen",
        }
    }

    /// Legacy wire name the mobile client displays.
    pub fn as_news_type(&self) -> &'static str {
        match self {
            Label::RealTime => "Real-time News",
            Label::Evergreen => "Evergreen News",
        }
    }
}

/// Classifier output. Both side scores are kept for explainability.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    pub label: Label,
    /// In [0,1]; 0 when the text carries no signal either way.
    pub confidence: f32,
    pub real_time_score: f32,
    pub evergreen_score: f32,
}

/// Score both sides and pick the winner.
///
/// real-time: match weights x multiplier, plus a flat bonus per distinct
/// time-reference hit. evergreen: match weights x multiplier, plus a length
/// bonus for words above the configured threshold (long form skews evergreen).
/// Equal scores fall to the configured tie-break, Evergreen by default.
pub fn classify(
    cfg: &ClassifierCfg,
    features: &FeatureSet,
    real_time: &[KeywordMatch],
    evergreen: &[KeywordMatch],
) -> Classification {
    let rt_weights: f32 = real_time.iter().map(|m| m.weight).sum();
    let eg_weights: f32 = evergreen.iter().map(|m| m.weight).sum();

    let real_time_score =
        cfg.match_multiplier * rt_weights + cfg.time_pattern_bonus * features.time_hits.len() as f32;

    let words_over = features.word_count.saturating_sub(cfg.length_bonus_threshold) as f32;
    let evergreen_score = cfg.match_multiplier * eg_weights + cfg.length_bonus_per_word * words_over;

    let total = real_time_score + evergreen_score;
    let confidence = if total <= 0.0 {
        0.0
    } else {
        (real_time_score.max(evergreen_score) / (total + CONFIDENCE_EPSILON)).clamp(0.0, 1.0)
    };

    let label = if real_time_score > evergreen_score {
        Label::RealTime
    } else if evergreen_score > real_time_score {
        Label::Evergreen
    } else {
        match cfg.tie_break {
            TieBreak::Evergreen => Label::Evergreen,
            TieBreak::RealTime => Label::RealTime,
        }
    };

    Classification {
        label,
        confidence,
        real_time_score,
        evergreen_score,
    }
}
