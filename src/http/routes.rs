use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::{
    http::handlers::{
        admin::{
            attach_division_handler, create_division_handler, create_season_handler,
            create_session_handler, create_team_handler, debug_teams_handler,
            delete_season_handler, delete_session_handler, delete_team_handler,
            detach_division_handler, get_session_handler, list_registrations_handler,
            list_sessions_handler, login_handler, set_current_season_handler,
            update_division_entry_handler, update_registration_status_handler,
            update_season_handler, update_session_handler, update_team_handler,
        },
        create_registration_handler, environment_handler, get_current_season_handler,
        get_divisions_handler, get_filters_handler, get_players_handler, get_seasons_handler,
        get_team_handler, get_teams_handler, health_handler, validate_step_handler,
    },
    state::AppState,
};

pub fn create_http_routes(state: AppState) -> Router {
    let admin = Router::new()
        .route("/login", post(login_handler))
        .route("/debug-teams", get(debug_teams_handler))
        .route("/seasons", post(create_season_handler))
        .route(
            "/seasons/{id}",
            patch(update_season_handler).delete(delete_season_handler),
        )
        .route("/seasons/{id}/current", post(set_current_season_handler))
        .route("/seasons/{id}/divisions", post(attach_division_handler))
        .route(
            "/seasons/{id}/divisions/{key}",
            patch(update_division_entry_handler).delete(detach_division_handler),
        )
        .route("/divisions", post(create_division_handler))
        .route("/teams", post(create_team_handler))
        .route(
            "/teams/{id}",
            patch(update_team_handler).delete(delete_team_handler),
        )
        .route(
            "/sessions",
            get(list_sessions_handler).post(create_session_handler),
        )
        .route(
            "/sessions/{id}",
            get(get_session_handler)
                .patch(update_session_handler)
                .delete(delete_session_handler),
        )
        .route("/registrations", get(list_registrations_handler))
        .route(
            "/registrations/{id}/status",
            patch(update_registration_status_handler),
        );

    let api = Router::new()
        .route("/divisions", get(get_divisions_handler))
        .route("/seasons", get(get_seasons_handler))
        .route("/seasons/current", get(get_current_season_handler))
        .route("/health", get(health_handler))
        .route("/debug/environment", get(environment_handler))
        .route("/teams", get(get_teams_handler))
        .route("/teams/{id}", get(get_team_handler))
        .route("/players", get(get_players_handler))
        .route("/filters", get(get_filters_handler))
        .route("/registrations", post(create_registration_handler))
        .route("/registrations/steps/{step}", post(validate_step_handler))
        .nest("/admin", admin);

    Router::new().nest("/api", api).with_state(state)
}
