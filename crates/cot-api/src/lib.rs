//! COT API /v1: the checker's tools over HTTP
//!
//! Each tool answers with a single `{"type": "text", "text": ...}` payload.
//! Errors are text prefixed with `Error:`; the HTTP status is always 200 for
//! tool routes.

pub mod config;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod tools;

use std::sync::Arc;

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use cot_check::ConsistencyAnalyzer;
use cot_core::{NullPresenter, Presenter};

pub use config::ServerConfig;
pub use metrics::Metrics;
pub use tools::{TextContent, Tool, ToolCall, Toolbox};

#[derive(Clone)]
pub struct AppState {
    pub toolbox: Arc<Toolbox>,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    pub fn new(
        analyzer: ConsistencyAnalyzer,
        presenter: Arc<dyn Presenter>,
    ) -> anyhow::Result<Self> {
        let metrics = Arc::new(Metrics::new().context("failed to register metrics")?);
        let toolbox = Arc::new(Toolbox::new(analyzer, presenter, metrics.clone()));
        Ok(Self { toolbox, metrics })
    }

    /// Build the state described by `config`: profile, templates and console.
    pub fn from_config(config: &ServerConfig) -> anyhow::Result<Self> {
        let profile = config.load_profile().map_err(anyhow::Error::msg)?;
        tracing::info!(profile = %profile.name, "loaded consistency profile");

        let presenter: Arc<dyn Presenter> = if config.quiet {
            Arc::new(NullPresenter)
        } else {
            Arc::new(cot_out::console(config.templates_path.as_deref())?)
        };

        Self::new(ConsistencyAnalyzer::new(profile), presenter)
    }
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/v1/tools", get(handlers::list_tools))
        .route("/v1/tools/call", post(handlers::call))
        .route("/v1/tools/{name}", post(handlers::call_tool))
        .route("/v1/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics))
        .layer(middleware::trace())
        .layer(middleware::cors())
        .with_state(state)
}

pub async fn run(config: ServerConfig) -> anyhow::Result<()> {
    let state = AppState::from_config(&config)?;
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(&config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;

    tracing::info!("COT API listening on {}", config.addr);
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
