use axum::{Json, extract::State, http::StatusCode};

use crate::{
    auth::AdminAuth,
    errors::{ApiResult, ErrorResponse},
    http::extract::{AppJson, AppPath},
    models::{
        Season,
        admin::DeletedResponse,
        season::{CreateSeasonPayload, UpdateSeasonPayload},
    },
    services::season::{create_season, delete_season, set_current_season, update_season},
    state::AppState,
};

pub async fn create_season_handler(
    State(state): State<AppState>,
    AdminAuth(_): AdminAuth,
    AppJson(payload): AppJson<CreateSeasonPayload>,
) -> Result<(StatusCode, Json<Season>), ErrorResponse> {
    match create_season(&state.cms, payload).await {
        Ok(season) => Ok((StatusCode::CREATED, Json(season))),
        Err(err) => {
            tracing::error!("Error creating season: {}", err);
            Err(err.to_response())
        }
    }
}

pub async fn update_season_handler(
    State(state): State<AppState>,
    AdminAuth(_): AdminAuth,
    AppPath(season_id): AppPath<String>,
    AppJson(payload): AppJson<UpdateSeasonPayload>,
) -> ApiResult<Season> {
    let season = update_season(&state.cms, &season_id, payload)
        .await
        .map_err(|e| {
            tracing::error!("Error updating season {}: {}", season_id, e);
            e.to_response()
        })?;

    Ok(Json(season))
}

pub async fn delete_season_handler(
    State(state): State<AppState>,
    AdminAuth(_): AdminAuth,
    AppPath(season_id): AppPath<String>,
) -> ApiResult<DeletedResponse> {
    delete_season(&state.cms, &season_id).await.map_err(|e| {
        tracing::error!("Error deleting season {}: {}", season_id, e);
        e.to_response()
    })?;

    Ok(Json(DeletedResponse {
        id: season_id,
        deleted: true,
    }))
}

pub async fn set_current_season_handler(
    State(state): State<AppState>,
    AdminAuth(_): AdminAuth,
    AppPath(season_id): AppPath<String>,
) -> ApiResult<Season> {
    let season = set_current_season(&state.cms, &season_id)
        .await
        .map_err(|e| {
            tracing::error!("Error setting current season {}: {}", season_id, e);
            e.to_response()
        })?;

    Ok(Json(season))
}
