mod agent;
mod config;
mod errors;
mod flows;
mod models;
mod routes;
mod service;

use std::sync::Arc;

use axum::http::HeaderValue;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::agent::{OllamaAgentService, TextGenerator};
use crate::config::AppConfig;
use crate::routes::{api_router, AppState};
use crate::service::chat_service::ChatService;
use crate::service::report_service::ReportService;

fn cors_layer(config: &AppConfig) -> anyhow::Result<CorsLayer> {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    Ok(match &config.cors_allow_origin {
        Some(origin) => layer.allow_origin(origin.parse::<HeaderValue>()?),
        None => layer.allow_origin(Any),
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present (development convenience)
    dotenvy::dotenv().ok();

    // Initialise tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bizspark=debug,tower_http=debug".into()),
        )
        .init();

    let config = AppConfig::from_env()?;
    info!(
        ollama = %config.ollama_base_url,
        model = %config.model,
        "configuration loaded"
    );

    // ── Dependency wiring ─────────────────────────────────────────────────────
    let generator: Arc<dyn TextGenerator> =
        Arc::new(OllamaAgentService::new(&config.ollama_base_url, &config.model)?);
    let state = AppState {
        chat: ChatService::new(generator.clone()),
        reports: ReportService::new(generator),
    };

    // ── Router ────────────────────────────────────────────────────────────────
    let app = api_router(state)
        .layer(cors_layer(&config)?)
        .layer(TraceLayer::new_for_http());

    // ── Listen ────────────────────────────────────────────────────────────────
    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{addr}/");

    axum::serve(listener, app).await?;
    Ok(())
}
