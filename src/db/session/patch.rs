use sqlx::PgPool;

use crate::{
    db::session::SESSION_COLUMNS,
    errors::AppError,
    models::{Session, session::UpdateSessionPayload},
};

/// Applies the provided fields; absent ones keep their stored value.
pub async fn update_session(
    id: i32,
    payload: UpdateSessionPayload,
    postgres: &PgPool,
) -> Result<Session, AppError> {
    sqlx::query_as::<_, Session>(&format!(
        "UPDATE sessions SET
            season_id = COALESCE($2, season_id),
            name = COALESCE($3, name),
            start_date = COALESCE($4, start_date),
            end_date = COALESCE($5, end_date),
            is_active = COALESCE($6, is_active),
            fee_cents = COALESCE($7, fee_cents)
        WHERE id = $1
        RETURNING {SESSION_COLUMNS}"
    ))
    .bind(id)
    .bind(payload.season_id)
    .bind(payload.name)
    .bind(payload.start_date)
    .bind(payload.end_date)
    .bind(payload.is_active)
    .bind(payload.fee_cents)
    .fetch_optional(postgres)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to update session: {}", e)))?
    .ok_or_else(|| AppError::NotFound(format!("Session {} not found", id)))
}
