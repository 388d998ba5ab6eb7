use axum::{Json, extract::State};

use crate::{models::FilterOptions, services::fetch_filter_data, state::AppState};

pub async fn get_filters_handler(State(state): State<AppState>) -> Json<FilterOptions> {
    Json(fetch_filter_data(&state.cms, &state.postgres).await)
}
