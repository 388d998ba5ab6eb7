use axum::{Json, extract::State};

use crate::{
    errors::ApiResult,
    http::extract::AppQuery,
    models::{
        Player,
        player::{PlayerFilter, PlayerFilterParams},
    },
    services::league::get_players,
    state::AppState,
};

pub async fn get_players_handler(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<PlayerFilterParams>,
) -> ApiResult<Vec<Player>> {
    let filter = PlayerFilter::try_from(params).map_err(|e| e.to_response())?;

    let players = get_players(&state.postgres, &filter).await.map_err(|e| {
        tracing::error!("Failed to fetch players: {}", e);
        e.to_fetch_response("players")
    })?;

    Ok(Json(players))
}
