use axum::{Json, extract::State, http::StatusCode};

use crate::{
    auth::AdminAuth,
    errors::{ApiResult, ErrorResponse},
    http::extract::{AppJson, AppPath},
    models::{
        Team,
        admin::DeletedResponse,
        team::{CreateTeamPayload, UpdateTeamPayload},
    },
    services::league::{create_team, delete_team, update_team},
    state::AppState,
};

pub async fn create_team_handler(
    State(state): State<AppState>,
    AdminAuth(_): AdminAuth,
    AppJson(payload): AppJson<CreateTeamPayload>,
) -> Result<(StatusCode, Json<Team>), ErrorResponse> {
    match create_team(&state.cms, payload).await {
        Ok(team) => Ok((StatusCode::CREATED, Json(team))),
        Err(err) => {
            tracing::error!("Error creating team: {}", err);
            Err(err.to_response())
        }
    }
}

pub async fn update_team_handler(
    State(state): State<AppState>,
    AdminAuth(_): AdminAuth,
    AppPath(team_id): AppPath<String>,
    AppJson(payload): AppJson<UpdateTeamPayload>,
) -> ApiResult<Team> {
    let team = update_team(&state.cms, &team_id, payload)
        .await
        .map_err(|e| {
            tracing::error!("Error updating team {}: {}", team_id, e);
            e.to_response()
        })?;

    Ok(Json(team))
}

pub async fn delete_team_handler(
    State(state): State<AppState>,
    AdminAuth(_): AdminAuth,
    AppPath(team_id): AppPath<String>,
) -> ApiResult<DeletedResponse> {
    delete_team(&state.cms, &team_id).await.map_err(|e| {
        tracing::error!("Error deleting team {}: {}", team_id, e);
        e.to_response()
    })?;

    Ok(Json(DeletedResponse {
        id: team_id,
        deleted: true,
    }))
}
