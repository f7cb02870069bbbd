use anyhow::{Context, Result};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use crate::api::{self, AppState};
use crate::config::ServerConfig;

/// Full application with the API nested under `/api`
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new().nest("/api", api::router(state)).layer(cors)
}

pub async fn run(server: &ServerConfig, state: AppState) -> Result<()> {
    let addr = format!("{}:{}", server.host, server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    tracing::info!("Weather dashboard running at http://{}", addr);
    axum::serve(listener, app(state))
        .await
        .context("Web server stopped unexpectedly")
}
