use axum::{Json, extract::State, http::StatusCode};

use crate::{
    models::health::HealthReport, services::health::check_health, state::AppState,
};

pub async fn health_handler(State(state): State<AppState>) -> (StatusCode, Json<HealthReport>) {
    let report = check_health(&state.cms, &state.postgres).await;

    let status = if report.healthy {
        StatusCode::OK
    } else {
        tracing::warn!("Health check failed: {:?}", report.checks);
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(report))
}
