// src/analyze/tips.rs
//! Educational-tip selection: a fixed lookup keyed by (label, risk level).
//! Pure table order, no ranking; identical inputs always yield the same tips.

use serde::Serialize;

use crate::analyze::classifier::Label;
use crate::analyze::risk::RiskLevel;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EducationalTip {
    pub topic: String,
    pub body: String,
}

fn tip(topic: &str, body: &str) -> EducationalTip {
    EducationalTip {
        topic: topic.to_string(),
        body: body.to_string(),
    }
}

fn check_the_date() -> EducationalTip {
    tip(
        "check-the-date",
        "Breaking claims age fast. Confirm when the event actually happened before sharing.",
    )
}

fn second_outlet() -> EducationalTip {
    tip(
        "cross-check-sources",
        "Look for the same story from at least one unrelated outlet before treating it as fact.",
    )
}

fn beyond_headline() -> EducationalTip {
    tip(
        "read-beyond-the-headline",
        "Headlines compress and distort. Read the full piece before forming a view.",
    )
}

fn urgency_is_a_tactic() -> EducationalTip {
    tip(
        "watch-for-urgency",
        "Pressure to act or share immediately is a persuasion tactic, not evidence.",
    )
}

fn check_credentials() -> EducationalTip {
    tip(
        "check-credentials",
        "Check who is making the claim and whether they have relevant expertise.",
    )
}

fn absolute_claims() -> EducationalTip {
    tip(
        "question-absolutes",
        "Words like 'guaranteed' and '100%' rarely survive contact with real evidence.",
    )
}

fn consult_fact_checkers() -> EducationalTip {
    tip(
        "consult-fact-checkers",
        "Established fact-checking organizations may already have reviewed this claim.",
    )
}

fn primary_sources() -> EducationalTip {
    tip(
        "find-primary-sources",
        "Trace explainers and guides back to their primary sources and cited studies.",
    )
}

/// Pick 1-4 tips for the result. The table is exhaustive over all label/level
/// combinations so callers never receive an empty list.
pub fn select_tips(label: Label, level: RiskLevel) -> Vec<EducationalTip> {
    match (label, level) {
        (Label::RealTime, RiskLevel::Low) => vec![check_the_date(), second_outlet()],
        (Label::RealTime, RiskLevel::Medium) => {
            vec![check_the_date(), second_outlet(), beyond_headline()]
        }
        (Label::RealTime, RiskLevel::High) => {
            vec![second_outlet(), urgency_is_a_tactic(), consult_fact_checkers()]
        }
        (Label::RealTime, RiskLevel::VeryHigh) => vec![
            urgency_is_a_tactic(),
            absolute_claims(),
            consult_fact_checkers(),
            second_outlet(),
        ],
        (Label::Evergreen, RiskLevel::Low) => vec![primary_sources()],
        (Label::Evergreen, RiskLevel::Medium) => vec![primary_sources(), check_credentials()],
        (Label::Evergreen, RiskLevel::High) => {
            vec![check_credentials(), absolute_claims(), consult_fact_checkers()]
        }
        (Label::Evergreen, RiskLevel::VeryHigh) => vec![
            absolute_claims(),
            check_credentials(),
            consult_fact_checkers(),
            primary_sources(),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LABELS: [Label; 2] = [Label::RealTime, Label::Evergreen];
    const LEVELS: [RiskLevel; 4] = [
        RiskLevel::Low,
        RiskLevel::Medium,
        RiskLevel::High,
        RiskLevel::VeryHigh,
    ];

    #[test]
    fn every_combination_yields_one_to_four_tips() {
        for label in LABELS {
            for level in LEVELS {
                let tips = select_tips(label, level);
                assert!(
                    (1..=4).contains(&tips.len()),
                    "{label:?}/{level:?} returned {} tips",
                    tips.len()
                );
            }
        }
    }

    #[test]
    fn selection_is_deterministic() {
        for label in LABELS {
            for level in LEVELS {
                assert_eq!(select_tips(label, level), select_tips(label, level));
            }
        }
    }

    #[test]
    fn higher_risk_leads_with_manipulation_tips() {
        let tips = select_tips(Label::RealTime, RiskLevel::VeryHigh);
        assert_eq!(tips[0].topic, "watch-for-urgency");
    }
}
