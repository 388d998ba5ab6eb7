use axum::{Json, extract::State, http::StatusCode};

use crate::{
    errors::{ApiResult, ErrorResponse},
    http::extract::{AppJson, AppPath},
    models::{
        Registration,
        registration::{RegistrationDraft, RegistrationStep, StepValidation},
    },
    services::registration::{create_registration, validate_step},
    state::AppState,
};

pub async fn create_registration_handler(
    State(state): State<AppState>,
    AppJson(draft): AppJson<RegistrationDraft>,
) -> Result<(StatusCode, Json<Registration>), ErrorResponse> {
    match create_registration(&state.postgres, draft).await {
        Ok(registration) => {
            tracing::info!(
                "Registration {} created for session {}",
                registration.id,
                registration.session_id
            );
            Ok((StatusCode::CREATED, Json(registration)))
        }
        Err(err) => {
            tracing::error!("Error creating registration: {}", err);
            Err(err.to_response())
        }
    }
}

pub async fn validate_step_handler(
    AppPath(step): AppPath<String>,
    AppJson(draft): AppJson<RegistrationDraft>,
) -> ApiResult<StepValidation> {
    let step = step.parse::<RegistrationStep>().map_err(|e| e.to_response())?;

    Ok(Json(StepValidation::from(validate_step(step, &draft))))
}
