use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    db::registration::REGISTRATION_COLUMNS,
    errors::AppError,
    models::{
        Registration, RegistrationStatus,
        registration::{NewRegistration, RegistrationRow},
    },
};

pub async fn create_registration(
    registration: NewRegistration,
    amount_due_cents: i32,
    postgres: &PgPool,
) -> Result<Registration, AppError> {
    let row = sqlx::query_as::<_, RegistrationRow>(&format!(
        "INSERT INTO registrations
            (id, session_id, first_name, last_name, email, phone, position,
             division_id, team_id, jersey_number, status, amount_due_cents)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        RETURNING {REGISTRATION_COLUMNS}"
    ))
    .bind(Uuid::new_v4())
    .bind(registration.session_id)
    .bind(&registration.first_name)
    .bind(&registration.last_name)
    .bind(&registration.email)
    .bind(&registration.phone)
    .bind(registration.position.code())
    .bind(&registration.division_id)
    .bind(&registration.team_id)
    .bind(registration.jersey_number)
    .bind(RegistrationStatus::Pending.as_str())
    .bind(amount_due_cents)
    .fetch_one(postgres)
    .await
    .map_err(|e| insert_error(e, &registration.email))?;

    let registration = Registration::try_from(row)?;
    tracing::info!(
        "Created registration {} for session {}",
        registration.id,
        registration.session_id
    );

    Ok(registration)
}

/// `UNIQUE (session_id, email)` is what enforces one registration per email
/// and session, including under concurrent submissions.
fn insert_error(error: sqlx::Error, email: &str) -> AppError {
    match &error {
        sqlx::Error::Database(db_error) if db_error.is_unique_violation() => {
            AppError::BadRequest(format!("{email} is already registered for this session"))
        }
        _ => AppError::DatabaseError(format!("Failed to create registration: {}", error)),
    }
}
