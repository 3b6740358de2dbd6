//! HTTP surface for the classification engine.
//!
//! The `/categorize` response is a versioned schema (see `SCHEMA_VERSION`):
//! consumers read explicit optional fields instead of probing legacy key
//! aliases. Field names follow what the mobile client already displays
//! (`news_type`, `trust_score`, `further_education_suggestions`, ...).

use std::sync::{Arc, Mutex};

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::analyze::{self, Analysis, AnalyzeError, RiskLevel};
use crate::config::ConfigHandle;
use crate::history::History;

/// Bump when response fields change meaning; consumers pin on this.
pub const SCHEMA_VERSION: u32 = 2;

#[derive(Clone)]
pub struct AppState {
    config: ConfigHandle,
    history: Arc<History>,
    last: Arc<Mutex<Option<CategorizeResp>>>,
}

impl AppState {
    pub fn new(config: ConfigHandle) -> Self {
        Self {
            config,
            history: Arc::new(History::with_capacity(2000)),
            last: Arc::new(Mutex::new(None)),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/categorize", post(categorize))
        .route("/categorize/batch", post(categorize_batch))
        .route("/debug/history", get(debug_history))
        .route("/debug/last-result", get(debug_last_result))
        .route("/admin/reload-config", get(admin_reload_config))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct CategorizeReq {
    pub text: String,
    #[serde(default)]
    pub id: Option<String>,
}

/// The versioned wire result. `trust_score` keeps the legacy 0-10 scale the
/// client displays; `risk_score` is the underlying heuristic in [0,1].
#[derive(Debug, Clone, Serialize)]
pub struct CategorizeResp {
    pub schema_version: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub news_type: String,
    pub confidence: f32,
    pub misinformation_domain: String,
    pub risk_score: f32,
    pub risk_level: RiskLevel,
    pub trust_score: f32,
    pub fact_check_assessment: String,
    pub fact_check_completed: bool,
    /// Always empty: the engine consults no external sources. Kept so legacy
    /// consumers of the field keep working.
    pub sources_used: Vec<String>,
    pub signals: Vec<String>,
    pub further_education_suggestions: Vec<crate::analyze::EducationalTip>,
    pub timestamp: String,
}

/// JSON error body, same shape the legacy backend produced.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    status: &'static str,
}

pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl From<AnalyzeError> for ApiError {
    fn from(e: AnalyzeError) -> Self {
        let status = match e {
            AnalyzeError::EmptyInput => StatusCode::BAD_REQUEST,
        };
        Self {
            status,
            message: e.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                error: self.message,
                status: "failed",
            }),
        )
            .into_response()
    }
}

fn build_response(id: Option<String>, a: &Analysis) -> CategorizeResp {
    let trust_score = ((1.0 - a.risk.score) * 100.0).round() / 10.0;
    CategorizeResp {
        schema_version: SCHEMA_VERSION,
        id,
        news_type: a.classification.label.as_news_type().to_string(),
        confidence: a.classification.confidence,
        misinformation_domain: a.domain.as_str().to_string(),
        risk_score: a.risk.score,
        risk_level: a.risk.level,
        trust_score,
        fact_check_assessment: assessment_text(a.risk.level).to_string(),
        fact_check_completed: true,
        sources_used: Vec::new(),
        signals: a.risk.signals.clone(),
        further_education_suggestions: a.tips.clone(),
        timestamp: Utc::now().to_rfc3339(),
    }
}

/// Human-readable summary of the heuristic signal scan. Deliberately worded as
/// a signal assessment, never as a verified truth probability.
fn assessment_text(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::Low => "Few or no misinformation signals detected in this text.",
        RiskLevel::Medium => "Some misinformation signals detected; read with care.",
        RiskLevel::High => "Strong misinformation signals detected; verify before sharing.",
        RiskLevel::VeryHigh => {
            "Very strong misinformation signals detected across multiple pattern categories."
        }
    }
}

async fn categorize(
    State(state): State<AppState>,
    Json(req): Json<CategorizeReq>,
) -> Result<Json<CategorizeResp>, ApiError> {
    let cfg = state.config.current();
    let analysis = analyze::analyze(&cfg, &req.text)?;

    crate::metrics::record_analysis(&analysis);
    state.history.push(&analysis);

    let resp = build_response(req.id, &analysis);
    *state.last.lock().expect("last-result mutex poisoned") = Some(resp.clone());

    // Log a hash, never the raw text.
    info!(
        id = %anon_hash(&req.text),
        news_type = %resp.news_type,
        risk = resp.risk_level.as_str(),
        domain = %resp.misinformation_domain,
        "categorized"
    );

    Ok(Json(resp))
}

/// Batch input: either a bare array or the legacy `{"news_items": [...]}` wrapper.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BatchReq {
    Items(Vec<CategorizeReq>),
    Wrapped { news_items: Vec<CategorizeReq> },
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum BatchEntry {
    Ok(Box<CategorizeResp>),
    Failed {
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<String>,
        error: String,
        status: &'static str,
    },
}

#[derive(Debug, Serialize)]
struct BatchResp {
    processed_count: usize,
    results: Vec<BatchEntry>,
    status: &'static str,
    timestamp: String,
}

async fn categorize_batch(
    State(state): State<AppState>,
    Json(req): Json<BatchReq>,
) -> Json<BatchResp> {
    let items = match req {
        BatchReq::Items(items) | BatchReq::Wrapped { news_items: items } => items,
    };
    let cfg = state.config.current();

    let mut results = Vec::with_capacity(items.len());
    for item in items {
        match analyze::analyze(&cfg, &item.text) {
            Ok(analysis) => {
                crate::metrics::record_analysis(&analysis);
                state.history.push(&analysis);
                results.push(BatchEntry::Ok(Box::new(build_response(item.id, &analysis))));
            }
            Err(e) => results.push(BatchEntry::Failed {
                id: item.id,
                error: e.to_string(),
                status: "failed",
            }),
        }
    }

    Json(BatchResp {
        processed_count: results.len(),
        results,
        status: "completed",
        timestamp: Utc::now().to_rfc3339(),
    })
}

#[derive(Serialize)]
struct HistoryOut {
    ts_unix: u64,
    news_type: String,
    confidence: f32,
    risk_score: f32,
    risk_level: RiskLevel,
    misinformation_domain: String,
}

async fn debug_history(State(state): State<AppState>) -> Json<Vec<HistoryOut>> {
    let rows = state.history.snapshot_last_n(10);
    let out = rows
        .into_iter()
        .map(|h| HistoryOut {
            ts_unix: h.ts_unix,
            news_type: h.label.as_news_type().to_string(),
            confidence: h.confidence,
            risk_score: h.risk_score,
            risk_level: h.risk_level,
            misinformation_domain: h.domain.as_str().to_string(),
        })
        .collect::<Vec<_>>();
    Json(out)
}

async fn debug_last_result(State(state): State<AppState>) -> Json<Option<CategorizeResp>> {
    let last = state.last.lock().expect("last-result mutex poisoned").clone();
    Json(last)
}

async fn admin_reload_config(State(state): State<AppState>) -> String {
    match state.config.reload_from_disk() {
        Ok(()) => "reloaded".to_string(),
        Err(e) => format!("failed: {e}"),
    }
}

/// Short stable hash for log correlation without exposing request text.
fn anon_hash(text: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let digest = hasher.finalize();
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}
