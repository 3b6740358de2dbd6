//! News Risk Analyzer — Binary Entrypoint
//! Boots the Axum HTTP server, wiring routes, shared state, and middleware.

use std::net::SocketAddr;

use anyhow::Context;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use news_risk_analyzer::api::{self, AppState};
use news_risk_analyzer::config::{self, ConfigHandle, EngineConfig};
use news_risk_analyzer::metrics::Metrics;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("news_risk_analyzer=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op elsewhere. Enables ENGINE_CONFIG_PATH /
    // ENGINE_HOT_RELOAD / PORT from .env.
    let _ = dotenvy::dotenv();

    init_tracing();

    // Config load failure is fatal: never serve with partial configuration.
    let cfg = EngineConfig::load().context("failed to load engine config")?;
    let handle = ConfigHandle::new(cfg, config::config_path());
    config::start_hot_reload_thread(handle.clone());

    let metrics = Metrics::init();

    let state = AppState::new(handle);
    let router = api::create_router(state).merge(metrics.router());

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    tracing::info!(%addr, "news-risk-analyzer listening");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, router).await?;

    Ok(())
}
