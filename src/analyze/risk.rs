// src/analyze/risk.rs
//! Red-flag risk scoring with discrete severity levels.
//!
//! The score is a heuristic signal density, not a calibrated probability, and
//! must not be presented to end users as a verified truth measure.

use serde::Serialize;

use crate::analyze::features::FeatureSet;
use crate::analyze::matchers::KeywordMatch;
use crate::config::RiskCfg;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::VeryHigh => "very_high",
        }
    }
}

impl RiskCfg {
    /// Map a score in [0,1] onto its level. Boundaries are half-open:
    /// Low [0, low_max), Medium [low_max, medium_max), High [medium_max,
    /// high_max), VeryHigh [high_max, 1.0].
    pub fn level_for(&self, score: f32) -> RiskLevel {
        if score < self.low_max {
            RiskLevel::Low
        } else if score < self.medium_max {
            RiskLevel::Medium
        } else if score < self.high_max {
            RiskLevel::High
        } else {
            RiskLevel::VeryHigh
        }
    }
}

/// Frozen per-request assessment. A new request produces a new value; nothing
/// here is ever recomputed in place.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskAssessment {
    pub score: f32,
    pub level: RiskLevel,
    /// "sub_category: term" markers for every distinct red-flag hit.
    pub signals: Vec<String>,
}

/// Sum red-flag weights, normalize by text length (per 100 words, so long
/// documents are not penalized for length alone), clamp to [0,1].
pub fn score(cfg: &RiskCfg, features: &FeatureSet, red_flags: &[KeywordMatch]) -> RiskAssessment {
    let score = if red_flags.is_empty() {
        0.0
    } else {
        let raw: f32 = red_flags.iter().map(|m| m.weight).sum();
        let words = features.word_count.max(1) as f32;
        (raw / (words / 100.0)).clamp(0.0, 1.0)
    };

    let mut signals: Vec<String> = red_flags
        .iter()
        .map(|m| format!("{}: {}", m.category.as_str(), m.term))
        .collect();
    signals.sort();
    signals.dedup();

    RiskAssessment {
        score,
        level: cfg.level_for(score),
        signals,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::features::extract;
    use crate::analyze::matchers::SignalCategory;
    use crate::config::EngineConfig;

    fn cfg() -> RiskCfg {
        EngineConfig::embedded().risk.clone()
    }

    fn flag(term: &str, weight: f32) -> KeywordMatch {
        KeywordMatch {
            category: SignalCategory::Urgency,
            term: term.to_string(),
            weight,
        }
    }

    #[test]
    fn no_matches_means_zero_score_and_low_level() {
        let f = extract("An ordinary sentence about the weather.");
        let r = score(&cfg(), &f, &[]);
        assert_eq!(r.score, 0.0);
        assert_eq!(r.level, RiskLevel::Low);
        assert!(r.signals.is_empty());
    }

    #[test]
    fn level_boundaries_are_half_open() {
        let c = cfg();
        assert_eq!(c.level_for(0.0), RiskLevel::Low);
        assert_eq!(c.level_for(0.29), RiskLevel::Low);
        assert_eq!(c.level_for(0.30), RiskLevel::Medium);
        assert_eq!(c.level_for(0.49), RiskLevel::Medium);
        assert_eq!(c.level_for(0.50), RiskLevel::High);
        assert_eq!(c.level_for(0.69), RiskLevel::High);
        assert_eq!(c.level_for(0.70), RiskLevel::VeryHigh);
        assert_eq!(c.level_for(1.0), RiskLevel::VeryHigh);
    }

    #[test]
    fn dense_flags_in_short_text_clamp_to_one() {
        let f = extract("act now, guaranteed miracle cure, click here");
        let flags = vec![flag("act now", 2.0), flag("guaranteed", 1.5), flag("miracle cure", 2.5)];
        let r = score(&cfg(), &f, &flags);
        assert_eq!(r.score, 1.0);
        assert_eq!(r.level, RiskLevel::VeryHigh);
    }

    #[test]
    fn long_text_dilutes_the_same_flags() {
        let long_text = "neutral reporting with careful sourcing and context ".repeat(80);
        let f = extract(&long_text);
        let flags = vec![flag("act now", 2.0)];
        let r = score(&cfg(), &f, &flags);
        // 2.0 / (560 / 100) ≈ 0.357
        assert!(r.score > 0.30 && r.score < 0.50);
        assert_eq!(r.level, RiskLevel::Medium);
    }

    #[test]
    fn signals_cite_sub_category_and_term() {
        let f = extract("act now");
        let flags = vec![flag("act now", 2.0), flag("act now", 2.0)];
        let r = score(&cfg(), &f, &flags);
        assert_eq!(r.signals, vec!["urgency: act now".to_string()]);
    }
}
