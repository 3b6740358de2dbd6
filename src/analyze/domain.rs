// src/analyze/domain.rs
//! Misinformation-domain tagging: Health, Finance, or General.
//! `Other` exists for wire compatibility with older payloads and is accepted
//! on input, but the detector never produces it.

use serde::{Deserialize, Serialize};

use crate::analyze::features::FeatureSet;
use crate::analyze::matchers::total_occurrences;
use crate::config::DomainCfg;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Domain {
    Health,
    Finance,
    General,
    Other,
}

impl Domain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Health => "Health",
            Domain::Finance => "Finance",
            Domain::General => "General",
            Domain::Other => "Other",
        }
    }
}

/// The domain with more keyword hits wins; ties and zero-signal texts fall to
/// General.
pub fn detect(cfg: &DomainCfg, features: &FeatureSet) -> Domain {
    let health = total_occurrences(features, &cfg.health);
    let finance = total_occurrences(features, &cfg.finance);

    if health > finance {
        Domain::Health
    } else if finance > health {
        Domain::Finance
    } else {
        Domain::General
    }
}
