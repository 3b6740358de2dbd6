// tests/engine_properties.rs
//
// Invariants the engine must hold for any input: value ranges, determinism,
// monotonicity, and the score-to-level mapping at its exact boundaries.

use news_risk_analyzer::{analyze, EngineConfig, RiskLevel};

fn cfg() -> EngineConfig {
    EngineConfig::embedded()
}

const SAMPLE_TEXTS: &[&str] = &[
    "BREAKING: stock market crashes today at 2:30 PM",
    "A guide to understanding how vaccines work: a historical explanation",
    "Doctors hate this miracle cure — act now, 100% guaranteed, click here!",
    "The festival parade moved slowly through town.",
    "Urgent update: doctors are baffled, share before they are hiding it again",
    "x",
    "1234 5678 !!!",
];

#[test]
fn confidence_and_risk_stay_in_unit_range() {
    let cfg = cfg();
    for text in SAMPLE_TEXTS {
        let a = analyze(&cfg, text).unwrap();
        let c = a.classification.confidence;
        let r = a.risk.score;
        assert!((0.0..=1.0).contains(&c), "confidence {c} out of range for {text:?}");
        assert!((0.0..=1.0).contains(&r), "risk {r} out of range for {text:?}");
    }
}

#[test]
fn identical_input_yields_identical_results() {
    let cfg = cfg();
    for text in SAMPLE_TEXTS {
        let first = serde_json::to_value(analyze(&cfg, text).unwrap()).unwrap();
        let second = serde_json::to_value(analyze(&cfg, text).unwrap()).unwrap();
        assert_eq!(first, second, "engine must be stateless for {text:?}");
    }
}

#[test]
fn repeating_a_red_flag_never_lowers_the_risk_score() {
    let cfg = cfg();
    // Long neutral filler keeps the normalized score well below the clamp.
    let filler = "The village library restored its oldest reading room with local volunteers. "
        .repeat(60);

    let once = analyze(&cfg, &format!("{filler} Act now.")).unwrap();
    let twice = analyze(&cfg, &format!("{filler} Act now. Act now.")).unwrap();

    assert!(once.risk.score > 0.0);
    assert!(
        twice.risk.score >= once.risk.score,
        "risk fell from {} to {}",
        once.risk.score,
        twice.risk.score
    );
}

#[test]
fn risk_level_is_uniquely_determined_by_score() {
    let risk = cfg().risk.clone();
    // Exact boundary values per the fixed thresholds.
    assert_eq!(risk.level_for(0.30), RiskLevel::Medium);
    assert_eq!(risk.level_for(0.50), RiskLevel::High);
    assert_eq!(risk.level_for(0.70), RiskLevel::VeryHigh);
    // Just below each boundary.
    assert_eq!(risk.level_for(0.2999), RiskLevel::Low);
    assert_eq!(risk.level_for(0.4999), RiskLevel::Medium);
    assert_eq!(risk.level_for(0.6999), RiskLevel::High);
    // Endpoints.
    assert_eq!(risk.level_for(0.0), RiskLevel::Low);
    assert_eq!(risk.level_for(1.0), RiskLevel::VeryHigh);
}
