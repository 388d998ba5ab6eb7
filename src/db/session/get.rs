use sqlx::PgPool;

use crate::{db::session::SESSION_COLUMNS, errors::AppError, models::Session};

pub async fn get_all_sessions(postgres: &PgPool) -> Result<Vec<Session>, AppError> {
    let sessions = sqlx::query_as::<_, Session>(&format!(
        "SELECT {SESSION_COLUMNS}
			FROM sessions
			ORDER BY start_date DESC, id DESC"
    ))
    .fetch_all(postgres)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to fetch sessions: {}", e)))?;

    Ok(sessions)
}

pub async fn get_sessions_by_season(
    season_id: &str,
    postgres: &PgPool,
) -> Result<Vec<Session>, AppError> {
    let sessions = sqlx::query_as::<_, Session>(&format!(
        "SELECT {SESSION_COLUMNS}
			FROM sessions
			WHERE season_id = $1
			ORDER BY start_date DESC, id DESC"
    ))
    .bind(season_id)
    .fetch_all(postgres)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to fetch sessions: {}", e)))?;

    Ok(sessions)
}

pub async fn get_session(id: i32, postgres: &PgPool) -> Result<Session, AppError> {
    sqlx::query_as::<_, Session>(&format!(
        "SELECT {SESSION_COLUMNS} FROM sessions WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(postgres)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to fetch session: {}", e)))?
    .ok_or_else(|| AppError::NotFound(format!("Session {} not found", id)))
}
