use sqlx::PgPool;

use crate::{
    db::session::SESSION_COLUMNS,
    errors::AppError,
    models::{Session, session::CreateSessionPayload},
};

pub async fn create_session(
    payload: CreateSessionPayload,
    postgres: &PgPool,
) -> Result<Session, AppError> {
    let session = sqlx::query_as::<_, Session>(&format!(
        "INSERT INTO sessions (season_id, name, start_date, end_date, is_active, fee_cents)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING {SESSION_COLUMNS}"
    ))
    .bind(payload.season_id.trim())
    .bind(payload.name.trim())
    .bind(payload.start_date)
    .bind(payload.end_date)
    .bind(payload.is_active)
    .bind(payload.fee_cents)
    .fetch_one(postgres)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to create session: {}", e)))?;

    tracing::info!("Created new session: {} (ID: {})", session.name, session.id);

    Ok(session)
}
