//! history.rs — simple in-memory log of recent analyses for /debug endpoints.

use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::analyze::{Analysis, Domain, Label, RiskLevel};

#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub ts_unix: u64,
    pub label: Label,
    pub confidence: f32,
    pub risk_score: f32,
    pub risk_level: RiskLevel,
    pub domain: Domain,
}

#[derive(Debug)]
pub struct History {
    inner: Mutex<Vec<HistoryEntry>>,
    cap: usize,
}

impl History {
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            inner: Mutex::new(Vec::with_capacity(cap.min(10_000))),
            cap: cap.min(10_000),
        }
    }

    pub fn push(&self, a: &Analysis) {
        let entry = HistoryEntry {
            ts_unix: now_unix(),
            label: a.classification.label,
            confidence: a.classification.confidence,
            risk_score: a.risk.score,
            risk_level: a.risk.level,
            domain: a.domain,
        };

        let mut v = self.inner.lock().expect("history mutex poisoned");
        v.push(entry);
        if v.len() > self.cap {
            let excess = v.len() - self.cap;
            v.drain(0..excess);
        }
    }

    pub fn snapshot_last_n(&self, n: usize) -> Vec<HistoryEntry> {
        let v = self.inner.lock().expect("history mutex poisoned");
        let len = v.len();
        let start = len.saturating_sub(n);
        v[start..].to_vec()
    }
}

fn now_unix() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
