use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    db::registration::REGISTRATION_COLUMNS,
    errors::AppError,
    models::{Registration, RegistrationStatus, registration::RegistrationRow},
};

pub async fn update_registration_status(
    id: Uuid,
    status: RegistrationStatus,
    postgres: &PgPool,
) -> Result<Registration, AppError> {
    let row = sqlx::query_as::<_, RegistrationRow>(&format!(
        "UPDATE registrations SET status = $2 WHERE id = $1 RETURNING {REGISTRATION_COLUMNS}"
    ))
    .bind(id)
    .bind(status.as_str())
    .fetch_optional(postgres)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to update registration: {}", e)))?
    .ok_or_else(|| AppError::NotFound(format!("Registration {} not found", id)))?;

    tracing::info!("Registration {} is now {}", id, status);

    Registration::try_from(row)
}
