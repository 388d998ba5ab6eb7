use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;

use crate::{
    auth::AdminAuth,
    errors::{ApiResult, ErrorResponse},
    http::extract::{AppJson, AppPath},
    models::{
        DivisionSummary,
        admin::DeletedResponse,
        division::{AttachDivisionPayload, CreateDivisionPayload, UpdateDivisionEntryPayload},
    },
    services::division::{attach_division, create_division, detach_division, update_division_entry},
    state::AppState,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DivisionEntryResponse {
    pub season_id: String,
    pub entry_key: String,
}

pub async fn create_division_handler(
    State(state): State<AppState>,
    AdminAuth(_): AdminAuth,
    AppJson(payload): AppJson<CreateDivisionPayload>,
) -> Result<(StatusCode, Json<DivisionSummary>), ErrorResponse> {
    match create_division(&state.cms, payload).await {
        Ok(division) => Ok((StatusCode::CREATED, Json(division))),
        Err(err) => {
            tracing::error!("Error creating division: {}", err);
            Err(err.to_response())
        }
    }
}

pub async fn attach_division_handler(
    State(state): State<AppState>,
    AdminAuth(_): AdminAuth,
    AppPath(season_id): AppPath<String>,
    AppJson(payload): AppJson<AttachDivisionPayload>,
) -> Result<(StatusCode, Json<DivisionEntryResponse>), ErrorResponse> {
    let entry_key = attach_division(&state.cms, &season_id, payload)
        .await
        .map_err(|e| {
            tracing::error!("Error attaching division to season {}: {}", season_id, e);
            e.to_response()
        })?;

    Ok((
        StatusCode::CREATED,
        Json(DivisionEntryResponse {
            season_id,
            entry_key,
        }),
    ))
}

pub async fn update_division_entry_handler(
    State(state): State<AppState>,
    AdminAuth(_): AdminAuth,
    AppPath((season_id, entry_key)): AppPath<(String, String)>,
    AppJson(payload): AppJson<UpdateDivisionEntryPayload>,
) -> ApiResult<DivisionEntryResponse> {
    update_division_entry(&state.cms, &season_id, &entry_key, payload)
        .await
        .map_err(|e| {
            tracing::error!("Error updating division entry {}: {}", entry_key, e);
            e.to_response()
        })?;

    Ok(Json(DivisionEntryResponse {
        season_id,
        entry_key,
    }))
}

pub async fn detach_division_handler(
    State(state): State<AppState>,
    AdminAuth(_): AdminAuth,
    AppPath((season_id, entry_key)): AppPath<(String, String)>,
) -> ApiResult<DeletedResponse> {
    detach_division(&state.cms, &season_id, &entry_key)
        .await
        .map_err(|e| {
            tracing::error!("Error detaching division entry {}: {}", entry_key, e);
            e.to_response()
        })?;

    Ok(Json(DeletedResponse {
        id: entry_key,
        deleted: true,
    }))
}
