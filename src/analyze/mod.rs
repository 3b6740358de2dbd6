// src/analyze/mod.rs
//! Analysis pipeline entry: features, matchers, classifier and risk scorer,
//! domain tagging, tip selection. Everything here is pure per-request
//! computation over an immutable config snapshot.

pub mod classifier;
pub mod domain;
pub mod features;
pub mod matchers;
pub mod risk;
pub mod tips;

// Re-export convenient types.
pub use classifier::{classify, Classification, Label};
pub use domain::Domain;
pub use features::FeatureSet;
pub use matchers::{KeywordMatch, SignalCategory};
pub use risk::{RiskAssessment, RiskLevel};
pub use tips::EducationalTip;

use serde::Serialize;
use thiserror::Error;

use crate::config::EngineConfig;

/// Per-request failures. Expected low-signal inputs are never errors; only a
/// request that carries no text at all is rejected, and it is rejected before
/// any extraction so callers can tell "no text" apart from "no signal".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalyzeError {
    #[error("input text is empty")]
    EmptyInput,
}

/// Complete result for one text.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub classification: Classification,
    pub risk: RiskAssessment,
    pub domain: Domain,
    pub tips: Vec<EducationalTip>,
    pub word_count: usize,
    pub sentence_count: usize,
    pub entities: Vec<String>,
}

/// Run the full pipeline over one text.
pub fn analyze(cfg: &EngineConfig, text: &str) -> Result<Analysis, AnalyzeError> {
    if text.trim().is_empty() {
        return Err(AnalyzeError::EmptyInput);
    }

    let features = features::extract(text);

    let real_time = matchers::match_real_time(cfg, &features);
    let evergreen = matchers::match_evergreen(cfg, &features);
    let red_flags = matchers::match_red_flags(cfg, &features);

    let classification = classifier::classify(&cfg.classifier, &features, &real_time, &evergreen);
    let risk = risk::score(&cfg.risk, &features, &red_flags);
    let domain = domain::detect(&cfg.domains, &features);
    let tips = tips::select_tips(classification.label, risk.level);

    Ok(Analysis {
        classification,
        risk,
        domain,
        tips,
        word_count: features.word_count,
        sentence_count: features.sentence_count,
        entities: features.entities.iter().cloned().collect(),
    })
}
