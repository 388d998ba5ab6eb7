use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::{errors::AppError, models::Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationStatus {
    Pending,
    Paid,
    Cancelled,
}

impl RegistrationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistrationStatus::Pending => "pending",
            RegistrationStatus::Paid => "paid",
            RegistrationStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RegistrationStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(RegistrationStatus::Pending),
            "paid" => Ok(RegistrationStatus::Paid),
            "cancelled" | "canceled" => Ok(RegistrationStatus::Cancelled),
            other => Err(AppError::InvalidRecord(format!(
                "Unknown registration status: {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub id: Uuid,
    pub session_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub position: Position,
    pub division_id: Option<String>,
    pub team_id: Option<String>,
    pub jersey_number: Option<i16>,
    pub status: RegistrationStatus,
    pub amount_due_cents: i32,
    pub created_at: DateTime<Utc>,
}

/// `registrations` row; enum columns are stored as text.
#[derive(Debug, Clone, FromRow)]
pub struct RegistrationRow {
    pub id: Uuid,
    pub session_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub position: String,
    pub division_id: Option<String>,
    pub team_id: Option<String>,
    pub jersey_number: Option<i16>,
    pub status: String,
    pub amount_due_cents: i32,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<RegistrationRow> for Registration {
    type Error = AppError;

    fn try_from(row: RegistrationRow) -> Result<Self, Self::Error> {
        Ok(Registration {
            id: row.id,
            session_id: row.session_id,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            phone: row.phone,
            position: row
                .position
                .parse()
                .map_err(|_| AppError::InvalidRecord(format!("Bad position in row {}", row.id)))?,
            division_id: row.division_id,
            team_id: row.team_id,
            jersey_number: row.jersey_number,
            status: row.status.parse()?,
            amount_due_cents: row.amount_due_cents,
            created_at: row.created_at,
        })
    }
}

/// Form data as it accumulates across the registration steps. Every field is
/// optional so a single step can be validated in isolation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationDraft {
    pub session_id: Option<i32>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub position: Option<String>,
    pub division_id: Option<String>,
    pub team_id: Option<String>,
    pub jersey_number: Option<i32>,
    pub accept_terms: Option<bool>,
}

/// A draft that passed every step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRegistration {
    pub session_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub position: Position,
    pub division_id: Option<String>,
    pub team_id: Option<String>,
    pub jersey_number: Option<i16>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationStep {
    Player,
    Position,
    Division,
    Review,
}

impl FromStr for RegistrationStep {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "player" => Ok(RegistrationStep::Player),
            "position" => Ok(RegistrationStep::Position),
            "division" => Ok(RegistrationStep::Division),
            "review" => Ok(RegistrationStep::Review),
            other => Err(AppError::BadRequest(format!(
                "Unknown registration step: {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepValidation {
    pub valid: bool,
    pub errors: Vec<FieldError>,
}

impl From<Vec<FieldError>> for StepValidation {
    fn from(errors: Vec<FieldError>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateRegistrationStatusPayload {
    pub status: RegistrationStatus,
}
