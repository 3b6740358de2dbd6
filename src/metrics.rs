use axum::{routing::get, Router};
use metrics::{counter, describe_counter};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use crate::analyze::Analysis;

pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Initialize the Prometheus recorder and describe the engine counters.
    pub fn init() -> Self {
        let builder = PrometheusBuilder::new();

        let handle = builder
            .install_recorder()
            .expect("prometheus: install recorder");

        describe_counter!(
            "categorize_requests_total",
            "Texts analyzed by the classification engine"
        );
        describe_counter!("news_type_total", "Analyses by content-type label");
        describe_counter!("risk_level_total", "Analyses by risk level");

        Self { handle }
    }

    /// Returns a router exposing `/metrics` with the Prometheus exposition format.
    pub fn router(&self) -> Router {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let h = handle.clone();
                async move { h.render() }
            }),
        )
    }
}

/// Count one finished analysis. No-op when no recorder is installed (tests).
pub fn record_analysis(a: &Analysis) {
    counter!("categorize_requests_total").increment(1);
    counter!("news_type_total", "label" => a.classification.label.as_str()).increment(1);
    counter!("risk_level_total", "level" => a.risk.level.as_str()).increment(1);
}
