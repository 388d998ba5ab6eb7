use sqlx::PgPool;

use crate::errors::AppError;

pub async fn delete_session(id: i32, postgres: &PgPool) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM sessions WHERE id = $1")
        .bind(id)
        .execute(postgres)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to delete session: {}", e)))?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Session {} not found", id)));
    }

    tracing::info!("Deleted session {}", id);

    Ok(())
}
