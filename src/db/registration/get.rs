use sqlx::PgPool;

use crate::{
    db::registration::REGISTRATION_COLUMNS,
    errors::AppError,
    models::{Registration, registration::RegistrationRow},
};

pub async fn get_registrations(
    session_id: Option<i32>,
    postgres: &PgPool,
) -> Result<Vec<Registration>, AppError> {
    let rows = sqlx::query_as::<_, RegistrationRow>(&format!(
        "SELECT {REGISTRATION_COLUMNS}
			FROM registrations
			WHERE ($1::INTEGER IS NULL OR session_id = $1)
			ORDER BY created_at DESC"
    ))
    .bind(session_id)
    .fetch_all(postgres)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to fetch registrations: {}", e)))?;

    rows.into_iter().map(Registration::try_from).collect()
}
