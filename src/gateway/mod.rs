//! Axum-based HTTP gateway in front of the command core.
//!
//! - Proper HTTP/1.1 parsing and compliance (hyper)
//! - Request body size limits (64KB max)
//! - Request timeouts (30s) to prevent slow-loris attacks
//!
//! The gateway holds no mutable state: the todo client is stateless and the
//! bearer credential travels per request, so concurrent chats need no locks.

mod handlers;

use handlers::{handle_chat, handle_health};

use crate::classifier::{LlmPresenter, Presenter};
use crate::client::{TodoApi, TodoClient};
use crate::config::Config;
use anyhow::Result;
use axum::{
    Router,
    routing::{get, post},
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;

/// Maximum request body size (64KB) — prevents memory exhaustion
pub const MAX_BODY_SIZE: usize = 65_536;
/// Request timeout (30s) — prevents slow-loris attacks
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Shared state for all axum handlers
#[derive(Clone)]
pub struct AppState {
    pub api: Arc<dyn TodoApi>,
    /// Optional LLM presenter; `None` returns dispatcher replies verbatim.
    pub presenter: Option<Arc<dyn Presenter>>,
}

/// Chat request body
#[derive(serde::Deserialize)]
pub struct ChatBody {
    pub message: String,
}

/// Run the HTTP gateway.
pub async fn run_gateway(host: &str, port: u16, config: &Config) -> Result<()> {
    let addr: SocketAddr = format!("{host}:{port}").parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    run_gateway_with_listener(listener, config).await
}

/// Run the HTTP gateway from a pre-bound listener (ephemeral ports in tests).
pub async fn run_gateway_with_listener(
    listener: tokio::net::TcpListener,
    config: &Config,
) -> Result<()> {
    let addr = listener.local_addr()?;

    let api: Arc<dyn TodoApi> = Arc::new(TodoClient::new(
        &config.backend.base_url,
        config.backend.timeout_secs,
    ));
    let presenter: Option<Arc<dyn Presenter>> = config
        .classifier
        .as_ref()
        .map(|c| Arc::new(LlmPresenter::from_config(c)) as Arc<dyn Presenter>);

    tracing::info!(%addr, backend = %config.backend.base_url, "gateway listening");
    tracing::info!("  POST /chat → todo commands");
    tracing::info!("  GET /health → status");
    if presenter.is_some() {
        tracing::info!("  LLM presenter enabled");
    }

    let state = AppState { api, presenter };
    axum::serve(listener, router(state)).await?;

    Ok(())
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route("/chat", post(handle_chat))
        .with_state(state)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_SIZE))
        .layer(TimeoutLayer::new(Duration::from_secs(REQUEST_TIMEOUT_SECS)))
}
