use sqlx::PgPool;

use crate::{
    cms::CmsClient,
    db,
    errors::AppError,
    models::{FilterOptions, Position},
    services::{division, league, season},
    utils::sort_seasons_by_date,
};

/// Queries sessions, seasons, divisions and teams concurrently and merges them
/// with the fixed position list. Any failure aborts the whole aggregate.
pub async fn get_filter_options(
    cms: &CmsClient,
    postgres: &PgPool,
) -> Result<FilterOptions, AppError> {
    let (sessions, seasons, divisions, teams) = tokio::try_join!(
        db::session::get::get_all_sessions(postgres),
        season::get_all_seasons(cms),
        division::get_division_summaries(cms),
        league::get_team_summaries(cms),
    )?;

    Ok(FilterOptions {
        sessions,
        seasons: sort_seasons_by_date(&seasons),
        divisions,
        teams,
        positions: Position::ALL.to_vec(),
    })
}

/// Never fails: a backend outage degrades to empty filters (positions kept).
pub async fn fetch_filter_data(cms: &CmsClient, postgres: &PgPool) -> FilterOptions {
    match get_filter_options(cms, postgres).await {
        Ok(options) => options,
        Err(e) => {
            tracing::error!("Failed to fetch filter data: {}", e);
            FilterOptions::default()
        }
    }
}
