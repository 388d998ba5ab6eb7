pub mod division;
pub mod registration;
pub mod season;
pub mod session;
pub mod team;

use axum::{Json, extract::State};

use crate::{
    auth::{AdminAuth, login},
    errors::ApiResult,
    http::extract::AppJson,
    models::admin::{DebugTeamsResponse, LoginPayload, LoginResponse},
    services::league::get_all_teams,
    state::AppState,
};

pub use division::{
    attach_division_handler, create_division_handler, detach_division_handler,
    update_division_entry_handler,
};
pub use registration::{list_registrations_handler, update_registration_status_handler};
pub use season::{
    create_season_handler, delete_season_handler, set_current_season_handler,
    update_season_handler,
};
pub use session::{
    create_session_handler, delete_session_handler, get_session_handler, list_sessions_handler,
    update_session_handler,
};
pub use team::{create_team_handler, delete_team_handler, update_team_handler};

pub async fn login_handler(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginPayload>,
) -> ApiResult<LoginResponse> {
    let response = login(&payload.password, &state.config).map_err(|e| {
        tracing::warn!("Admin login failed: {}", e);
        e.to_response()
    })?;

    tracing::info!("Admin logged in");
    Ok(Json(response))
}

/// Raw team listing for checking what the CMS currently holds.
pub async fn debug_teams_handler(
    State(state): State<AppState>,
    AdminAuth(_): AdminAuth,
) -> ApiResult<DebugTeamsResponse> {
    let teams = get_all_teams(&state.cms).await.map_err(|e| {
        tracing::error!("Failed to fetch teams for debugging: {}", e);
        e.to_fetch_response("teams")
    })?;

    tracing::info!("Debug teams: {} team(s) in the CMS", teams.len());
    Ok(Json(DebugTeamsResponse { teams }))
}
