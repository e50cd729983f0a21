//! Web server: routing, middleware layers and startup

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::{Router, response::Html, routing::get};
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tracing::info;

use crate::api::{self, AppState};
use crate::config::ServerConfig;

/// Upper bound on request bodies; the plan form is tiny
const MAX_BODY_BYTES: usize = 16 * 1024;
/// Whole-request deadline, sized for three sequential model calls
const REQUEST_TIMEOUT: Duration = Duration::from_secs(600);

/// Bind the listener and serve until the process is stopped
pub async fn run(config: &ServerConfig, state: Arc<AppState>) -> Result<()> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Applied as separate `Router::layer` calls (last runs first: cors, then
    // the body limit, then the timeout) so axum re-boxes each response body;
    // `Cors` and `Timeout` need the inner body to implement `Default`, which
    // the limiter's response body does not.
    let app = Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .nest("/api", api::router(state))
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(cors);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Web server running at http://localhost:{}", config.port);
    axum::serve(listener, app)
        .await
        .context("Web server terminated")?;
    Ok(())
}

async fn index() -> Html<&'static str> {
    Html(include_str!("../assets/index.html"))
}

async fn health() -> &'static str {
    "ok"
}
