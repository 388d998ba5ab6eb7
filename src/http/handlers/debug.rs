use axum::{Json, extract::State};

use crate::{
    models::diagnostics::EnvironmentReport, services::diagnostics::environment_report,
    state::AppState,
};

pub async fn environment_handler(State(state): State<AppState>) -> Json<EnvironmentReport> {
    Json(environment_report(&state.config))
}
