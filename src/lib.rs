pub mod auth;
pub mod cms;
pub mod config;
mod db;
pub mod errors;
pub mod http;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;

use axum::{Json, Router, http::StatusCode, middleware as axum_middleware};
use std::net::SocketAddr;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::{
    cms::CmsClient,
    config::Config,
    errors::{AppError, ErrorBody},
    middleware::{cors_layer, create_rate_limiter, rate_limit_middleware},
    state::AppState,
};

/// Assembles the full router with its layers. Split out of `start_server`
/// so tests can drive it without binding a socket.
pub fn build_app(state: AppState) -> Router {
    let rate_limiter = create_rate_limiter(state.config.rate_limit_per_minute);
    let cors = cors_layer(&state.config.allowed_origins);

    Router::new()
        .merge(http::create_http_routes(state))
        .fallback(|| async { (StatusCode::NOT_FOUND, Json(ErrorBody::new("Not found"))) })
        .layer(axum_middleware::from_fn(move |req, next| {
            rate_limit_middleware(rate_limiter.clone(), req, next)
        }))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub async fn start_server() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    tracing::info!(
        "Starting in {} mode (cms dataset: {})",
        config.app_env,
        config.cms.dataset
    );

    if config.is_production() && config.jwt_secret.is_none() {
        tracing::warn!("JWT_SECRET is not set; admin routes are disabled");
    }

    let cms = CmsClient::new(&config.cms, config.http_timeout_seconds)?;
    let postgres = db::connect(&config).await?;
    let port = config.port;

    let state = AppState::new(cms, postgres.clone(), config);
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;
    tracing::info!("League server running at http://127.0.0.1:{port}/api");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    postgres.close().await;
    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
