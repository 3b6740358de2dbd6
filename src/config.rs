// src/config.rs
//! Engine configuration: vocabularies, weights, multipliers, risk thresholds.
//!
//! Loaded once at startup from TOML and validated as a whole; the engine never
//! runs on partial configuration. At runtime the config is an immutable
//! snapshot behind `ConfigHandle`; reloads swap the whole snapshot atomically,
//! so in-flight requests keep the version they started with.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};
use std::thread;
use std::time::{Duration, SystemTime};
use tracing::{info, warn};

// --- env names & defaults ---
pub const ENV_ENGINE_CONFIG_PATH: &str = "ENGINE_CONFIG_PATH";
pub const ENV_ENGINE_HOT_RELOAD: &str = "ENGINE_HOT_RELOAD";

/// Default configuration shipped inside the binary.
const DEFAULT_ENGINE_TOML: &str = include_str!("../config/engine.toml");

#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    pub classifier: ClassifierCfg,
    pub risk: RiskCfg,
    pub vocabulary: VocabularyCfg,
    pub domains: DomainCfg,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClassifierCfg {
    /// Multiplier applied to every keyword-match weight on both sides.
    pub match_multiplier: f32,
    /// Flat bonus per distinct time-reference hit (real-time side).
    pub time_pattern_bonus: f32,
    pub real_time_term_weight: f32,
    pub evergreen_term_weight: f32,
    /// Words above this threshold earn the evergreen side a per-word bonus.
    pub length_bonus_threshold: usize,
    pub length_bonus_per_word: f32,
    #[serde(default)]
    pub tie_break: TieBreak,
}

/// Which label wins when both scores come out equal. Real-time claims without
/// a strong time signal are more often mislabeled, hence the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    #[default]
    Evergreen,
    RealTime,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RiskCfg {
    pub low_max: f32,
    pub medium_max: f32,
    pub high_max: f32,
    pub weights: RedFlagWeights,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RedFlagWeights {
    pub conspiracy: f32,
    pub absolute_claim: f32,
    pub urgency: f32,
    pub clickbait: f32,
    pub anti_establishment: f32,
    pub miracle_cure: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VocabularyCfg {
    pub real_time: Vec<String>,
    pub evergreen: Vec<String>,
    pub red_flags: RedFlagVocab,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RedFlagVocab {
    pub conspiracy: Vec<String>,
    pub absolute_claim: Vec<String>,
    pub urgency: Vec<String>,
    pub clickbait: Vec<String>,
    pub anti_establishment: Vec<String>,
    pub miracle_cure: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DomainCfg {
    pub health: Vec<String>,
    pub finance: Vec<String>,
}

impl EngineConfig {
    /// The embedded default. Panics only if the shipped TOML is broken, which
    /// a unit test pins down.
    pub fn embedded() -> Self {
        Self::from_toml_str(DEFAULT_ENGINE_TOML).expect("embedded engine config is valid")
    }

    /// Resolve and load the active configuration: `ENGINE_CONFIG_PATH` if set
    /// (any failure is fatal), otherwise the embedded default.
    pub fn load() -> anyhow::Result<Self> {
        match config_path() {
            Some(path) => Self::from_path(&path),
            None => Ok(Self::embedded()),
        }
    }

    pub fn from_path(path: &std::path::Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read engine config at {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("invalid engine config at {}", path.display()))
    }

    /// Parse and validate. A config that fails validation is rejected as a
    /// whole so scoring can never run silently skewed.
    pub fn from_toml_str(toml_str: &str) -> anyhow::Result<Self> {
        let cfg: EngineConfig = toml::from_str(toml_str)?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> anyhow::Result<()> {
        let c = &self.classifier;
        for (name, v) in [
            ("classifier.match_multiplier", c.match_multiplier),
            ("classifier.time_pattern_bonus", c.time_pattern_bonus),
            ("classifier.real_time_term_weight", c.real_time_term_weight),
            ("classifier.evergreen_term_weight", c.evergreen_term_weight),
            ("classifier.length_bonus_per_word", c.length_bonus_per_word),
        ] {
            if !v.is_finite() || v < 0.0 {
                bail!("{name} must be a non-negative finite number, got {v}");
            }
        }

        let w = &self.risk.weights;
        for (name, v) in [
            ("risk.weights.conspiracy", w.conspiracy),
            ("risk.weights.absolute_claim", w.absolute_claim),
            ("risk.weights.urgency", w.urgency),
            ("risk.weights.clickbait", w.clickbait),
            ("risk.weights.anti_establishment", w.anti_establishment),
            ("risk.weights.miracle_cure", w.miracle_cure),
        ] {
            if !v.is_finite() || v < 0.0 {
                bail!("{name} must be a non-negative finite number, got {v}");
            }
        }

        let r = &self.risk;
        let ordered = 0.0 < r.low_max
            && r.low_max < r.medium_max
            && r.medium_max < r.high_max
            && r.high_max < 1.0;
        if !ordered {
            bail!(
                "risk thresholds must satisfy 0 < low_max < medium_max < high_max < 1, got {}/{}/{}",
                r.low_max,
                r.medium_max,
                r.high_max
            );
        }

        let vocab_sets: [(&str, &Vec<String>); 10] = [
            ("vocabulary.real_time", &self.vocabulary.real_time),
            ("vocabulary.evergreen", &self.vocabulary.evergreen),
            ("vocabulary.red_flags.conspiracy", &self.vocabulary.red_flags.conspiracy),
            (
                "vocabulary.red_flags.absolute_claim",
                &self.vocabulary.red_flags.absolute_claim,
            ),
            ("vocabulary.red_flags.urgency", &self.vocabulary.red_flags.urgency),
            ("vocabulary.red_flags.clickbait", &self.vocabulary.red_flags.clickbait),
            (
                "vocabulary.red_flags.anti_establishment",
                &self.vocabulary.red_flags.anti_establishment,
            ),
            ("vocabulary.red_flags.miracle_cure", &self.vocabulary.red_flags.miracle_cure),
            ("domains.health", &self.domains.health),
            ("domains.finance", &self.domains.finance),
        ];
        for (name, terms) in vocab_sets {
            if terms.is_empty() {
                bail!("{name} must not be empty");
            }
            if let Some(blank) = terms.iter().find(|t| t.trim().is_empty()) {
                bail!("{name} contains a blank term: {blank:?}");
            }
        }

        Ok(())
    }
}

/// Path override from the environment, if any.
pub fn config_path() -> Option<PathBuf> {
    std::env::var(ENV_ENGINE_CONFIG_PATH).ok().map(PathBuf::from)
}

/// Thread-safe handle over the active configuration snapshot.
///
/// Readers clone out an `Arc<EngineConfig>`; a reload builds a complete new
/// config and swaps the Arc, so no request ever observes a mix of versions.
#[derive(Clone)]
pub struct ConfigHandle {
    inner: Arc<RwLock<Arc<EngineConfig>>>,
    path: Option<PathBuf>,
}

impl ConfigHandle {
    pub fn new(cfg: EngineConfig, path: Option<PathBuf>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(cfg))),
            path,
        }
    }

    /// The current snapshot. Cheap; callers hold it for the whole request.
    pub fn current(&self) -> Arc<EngineConfig> {
        self.inner
            .read()
            .map(|g| Arc::clone(&g))
            .unwrap_or_else(|_| Arc::new(EngineConfig::embedded()))
    }

    /// Swap in a new snapshot.
    pub fn swap(&self, cfg: EngineConfig) {
        if let Ok(mut guard) = self.inner.write() {
            *guard = Arc::new(cfg);
        }
    }

    /// Re-read the config file this handle was created with and swap it in.
    /// Parse/validation errors leave the current snapshot untouched.
    pub fn reload_from_disk(&self) -> anyhow::Result<()> {
        let Some(path) = &self.path else {
            bail!("running on the embedded config; nothing to reload");
        };
        let fresh = EngineConfig::from_path(path)?;
        self.swap(fresh);
        info!(path = %path.display(), "engine config reloaded");
        Ok(())
    }
}

/// Returns true if the mtime watcher should run (opt-in via env).
fn hot_reload_enabled() -> bool {
    std::env::var(ENV_ENGINE_HOT_RELOAD).ok().as_deref() == Some("1")
}

/// Poll the config file's mtime every 2s and swap the snapshot on change.
/// No-op unless `ENGINE_HOT_RELOAD=1` and the handle has a file path.
pub fn start_hot_reload_thread(handle: ConfigHandle) {
    if !hot_reload_enabled() {
        return;
    }
    let Some(path) = handle.path.clone() else {
        return;
    };

    thread::spawn(move || {
        let poll = Duration::from_secs(2);
        let mut last_mtime: Option<SystemTime> = None;

        loop {
            match fs::metadata(&path).and_then(|m| m.modified()) {
                Ok(mtime) => {
                    let changed = match last_mtime {
                        None => {
                            last_mtime = Some(mtime);
                            false
                        }
                        Some(prev) => mtime > prev,
                    };
                    if changed {
                        if let Err(e) = handle.reload_from_disk() {
                            warn!(error = %e, "hot reload failed; keeping previous config");
                        }
                        last_mtime = Some(mtime);
                    }
                }
                Err(_) => {
                    // File missing or unreadable; keep trying.
                }
            }
            thread::sleep(poll);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_default_parses_and_validates() {
        let cfg = EngineConfig::embedded();
        assert_eq!(cfg.classifier.tie_break, TieBreak::Evergreen);
        assert!(cfg.risk.low_max < cfg.risk.medium_max);
        assert!(!cfg.vocabulary.real_time.is_empty());
        assert!(!cfg.vocabulary.red_flags.miracle_cure.is_empty());
    }

    #[test]
    fn unordered_thresholds_are_rejected() {
        let mut toml_str = DEFAULT_ENGINE_TOML.replace("low_max = 0.30", "low_max = 0.80");
        let err = EngineConfig::from_toml_str(&toml_str).unwrap_err();
        assert!(err.to_string().contains("risk thresholds"));

        toml_str = DEFAULT_ENGINE_TOML.replace("high_max = 0.70", "high_max = 1.50");
        assert!(EngineConfig::from_toml_str(&toml_str).is_err());
    }

    #[test]
    fn negative_weights_are_rejected() {
        let toml_str = DEFAULT_ENGINE_TOML.replace("urgency = 2.0", "urgency = -1.0");
        let err = EngineConfig::from_toml_str(&toml_str).unwrap_err();
        assert!(err.to_string().contains("risk.weights.urgency"));
    }

    #[test]
    fn empty_vocabulary_is_rejected() {
        // Strip every real_time term by replacing the whole array.
        let start = DEFAULT_ENGINE_TOML.find("real_time = [").unwrap();
        let end = DEFAULT_ENGINE_TOML[start..].find(']').unwrap() + start + 1;
        let toml_str = format!(
            "{}real_time = []{}",
            &DEFAULT_ENGINE_TOML[..start],
            &DEFAULT_ENGINE_TOML[end..]
        );
        let err = EngineConfig::from_toml_str(&toml_str).unwrap_err();
        assert!(err.to_string().contains("vocabulary.real_time"));
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(EngineConfig::from_toml_str("this is not toml [").is_err());
    }

    #[test]
    fn handle_swaps_snapshots_atomically() {
        let handle = ConfigHandle::new(EngineConfig::embedded(), None);
        let before = handle.current();
        assert_eq!(before.classifier.tie_break, TieBreak::Evergreen);

        let mut next = EngineConfig::embedded();
        next.classifier.tie_break = TieBreak::RealTime;
        handle.swap(next);

        // The old snapshot is unchanged; the handle serves the new one.
        assert_eq!(before.classifier.tie_break, TieBreak::Evergreen);
        assert_eq!(handle.current().classifier.tie_break, TieBreak::RealTime);
    }

    #[test]
    fn reload_without_a_path_fails_cleanly() {
        let handle = ConfigHandle::new(EngineConfig::embedded(), None);
        assert!(handle.reload_from_disk().is_err());
    }
}
