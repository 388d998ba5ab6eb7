use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::{
    errors::ApiResult,
    models::Season,
    services::{get_all_seasons, get_current_season},
    state::AppState,
    utils::sort_seasons_by_date,
};

#[derive(Debug, Serialize, Deserialize)]
pub struct CurrentSeasonResponse {
    pub season: Option<Season>,
}

/// All seasons, most recent first.
pub async fn get_seasons_handler(State(state): State<AppState>) -> ApiResult<Vec<Season>> {
    let seasons = get_all_seasons(&state.cms).await.map_err(|e| {
        tracing::error!("Failed to fetch seasons: {}", e);
        e.to_fetch_response("seasons")
    })?;

    Ok(Json(sort_seasons_by_date(&seasons)))
}

/// `{season: null}` is a normal answer when nothing is active.
pub async fn get_current_season_handler(
    State(state): State<AppState>,
) -> ApiResult<CurrentSeasonResponse> {
    let season = get_current_season(&state.cms).await.map_err(|e| {
        tracing::error!("Failed to fetch current season: {}", e);
        e.to_fetch_response("current season")
    })?;

    Ok(Json(CurrentSeasonResponse { season }))
}
