use axum::{Json, extract::State};

use crate::{
    errors::{ApiResult, AppError},
    http::extract::AppPath,
    models::Team,
    services::league::{get_all_teams, get_team},
    state::AppState,
};

pub async fn get_teams_handler(State(state): State<AppState>) -> ApiResult<Vec<Team>> {
    let teams = get_all_teams(&state.cms).await.map_err(|e| {
        tracing::error!("Failed to fetch teams: {}", e);
        e.to_fetch_response("teams")
    })?;

    Ok(Json(teams))
}

pub async fn get_team_handler(
    State(state): State<AppState>,
    AppPath(team_id): AppPath<String>,
) -> ApiResult<Team> {
    let team = get_team(&state.cms, &team_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch team {}: {}", team_id, e);
            e.to_fetch_response("team")
        })?
        .ok_or_else(|| AppError::NotFound("Team not found".into()).to_response())?;

    Ok(Json(team))
}
