use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;

use crate::{
    auth::AdminAuth,
    db::session::{
        delete::delete_session,
        get::{get_all_sessions, get_session, get_sessions_by_season},
        patch::update_session,
        post::create_session,
    },
    errors::{ApiResult, AppError, ErrorResponse},
    http::extract::{AppJson, AppPath, AppQuery},
    models::{
        Session,
        admin::DeletedResponse,
        session::{CreateSessionPayload, UpdateSessionPayload},
    },
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct SessionQuery {
    pub season: Option<String>,
}

pub async fn list_sessions_handler(
    State(state): State<AppState>,
    AdminAuth(_): AdminAuth,
    AppQuery(query): AppQuery<SessionQuery>,
) -> ApiResult<Vec<Session>> {
    let sessions = match query.season.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(season_id) => get_sessions_by_season(season_id, &state.postgres).await,
        None => get_all_sessions(&state.postgres).await,
    }
    .map_err(|e| {
        tracing::error!("Failed to fetch sessions: {}", e);
        e.to_fetch_response("sessions")
    })?;

    Ok(Json(sessions))
}

pub async fn get_session_handler(
    State(state): State<AppState>,
    AdminAuth(_): AdminAuth,
    AppPath(session_id): AppPath<i32>,
) -> ApiResult<Session> {
    let session = get_session(session_id, &state.postgres)
        .await
        .map_err(|e| {
            if !e.is_not_found() {
                tracing::error!("Failed to fetch session {}: {}", session_id, e);
            }
            e.to_fetch_response("session")
        })?;

    Ok(Json(session))
}

pub async fn create_session_handler(
    State(state): State<AppState>,
    AdminAuth(_): AdminAuth,
    AppJson(payload): AppJson<CreateSessionPayload>,
) -> Result<(StatusCode, Json<Session>), ErrorResponse> {
    validate_session_fields(
        Some(payload.name.as_str()),
        Some(payload.season_id.as_str()),
        Some(payload.start_date),
        Some(payload.end_date),
        Some(payload.fee_cents),
    )
    .map_err(|e| e.to_response())?;

    match create_session(payload, &state.postgres).await {
        Ok(session) => Ok((StatusCode::CREATED, Json(session))),
        Err(err) => {
            tracing::error!("Error creating session: {}", err);
            Err(err.to_response())
        }
    }
}

pub async fn update_session_handler(
    State(state): State<AppState>,
    AdminAuth(_): AdminAuth,
    AppPath(session_id): AppPath<i32>,
    AppJson(payload): AppJson<UpdateSessionPayload>,
) -> ApiResult<Session> {
    // Date order has to hold against the stored values too.
    let current = get_session(session_id, &state.postgres)
        .await
        .map_err(|e| e.to_response())?;

    validate_session_fields(
        payload.name.as_deref(),
        payload.season_id.as_deref(),
        Some(payload.start_date.unwrap_or(current.start_date)),
        Some(payload.end_date.unwrap_or(current.end_date)),
        payload.fee_cents,
    )
    .map_err(|e| e.to_response())?;

    let session = update_session(session_id, payload, &state.postgres)
        .await
        .map_err(|e| {
            tracing::error!("Error updating session {}: {}", session_id, e);
            e.to_response()
        })?;

    Ok(Json(session))
}

pub async fn delete_session_handler(
    State(state): State<AppState>,
    AdminAuth(_): AdminAuth,
    AppPath(session_id): AppPath<i32>,
) -> ApiResult<DeletedResponse> {
    delete_session(session_id, &state.postgres)
        .await
        .map_err(|e| {
            tracing::error!("Error deleting session {}: {}", session_id, e);
            e.to_response()
        })?;

    Ok(Json(DeletedResponse {
        id: session_id.to_string(),
        deleted: true,
    }))
}

fn validate_session_fields(
    name: Option<&str>,
    season_id: Option<&str>,
    start_date: Option<chrono::NaiveDate>,
    end_date: Option<chrono::NaiveDate>,
    fee_cents: Option<i32>,
) -> Result<(), AppError> {
    if name.is_some_and(|n| n.trim().is_empty()) {
        return Err(AppError::BadRequest("Session name is required".into()));
    }
    if season_id.is_some_and(|s| s.trim().is_empty()) {
        return Err(AppError::BadRequest("Season is required".into()));
    }
    if let (Some(start), Some(end)) = (start_date, end_date) {
        if end <= start {
            return Err(AppError::BadRequest(
                "End date must be after start date".into(),
            ));
        }
    }
    if fee_cents.is_some_and(|fee| fee < 0) {
        return Err(AppError::BadRequest("Fee cannot be negative".into()));
    }
    Ok(())
}
