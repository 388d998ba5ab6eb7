use axum::{Json, extract::State};

use crate::{
    errors::ApiResult,
    models::Division,
    services::get_active_divisions,
    state::AppState,
};

pub async fn get_divisions_handler(State(state): State<AppState>) -> ApiResult<Vec<Division>> {
    let divisions = get_active_divisions(&state.cms).await.map_err(|e| {
        tracing::error!("Failed to fetch divisions: {}", e);
        e.to_fetch_response("divisions")
    })?;

    Ok(Json(divisions))
}
