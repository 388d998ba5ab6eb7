use axum::{Json, extract::State};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    auth::AdminAuth,
    errors::ApiResult,
    http::extract::{AppJson, AppPath, AppQuery},
    models::{Registration, registration::UpdateRegistrationStatusPayload},
    services::registration::{list_registrations, update_registration_status},
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct RegistrationQuery {
    pub session: Option<i32>,
}

pub async fn list_registrations_handler(
    State(state): State<AppState>,
    AdminAuth(_): AdminAuth,
    AppQuery(query): AppQuery<RegistrationQuery>,
) -> ApiResult<Vec<Registration>> {
    let registrations = list_registrations(&state.postgres, query.session)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch registrations: {}", e);
            e.to_fetch_response("registrations")
        })?;

    Ok(Json(registrations))
}

pub async fn update_registration_status_handler(
    State(state): State<AppState>,
    AdminAuth(_): AdminAuth,
    AppPath(registration_id): AppPath<Uuid>,
    AppJson(payload): AppJson<UpdateRegistrationStatusPayload>,
) -> ApiResult<Registration> {
    let registration = update_registration_status(&state.postgres, registration_id, payload.status)
        .await
        .map_err(|e| {
            tracing::error!("Error updating registration {}: {}", registration_id, e);
            e.to_response()
        })?;

    Ok(Json(registration))
}
