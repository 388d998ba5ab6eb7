use sqlx::PgPool;

use crate::errors::AppError;

pub async fn ping(postgres: &PgPool) -> Result<(), AppError> {
    sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(postgres)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Database ping failed: {}", e)))?;

    Ok(())
}
