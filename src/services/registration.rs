use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    db,
    errors::AppError,
    models::{
        Position, Registration, RegistrationStatus,
        non_empty,
        registration::{FieldError, NewRegistration, RegistrationDraft, RegistrationStep},
    },
};

const MAX_NAME_LENGTH: usize = 50;
const MIN_PHONE_DIGITS: usize = 7;

/// Field errors of a single step. `Review` re-checks every earlier step.
pub fn validate_step(step: RegistrationStep, draft: &RegistrationDraft) -> Vec<FieldError> {
    let mut errors = Vec::new();

    match step {
        RegistrationStep::Player => validate_player(draft, &mut errors),
        RegistrationStep::Position => validate_position(draft, &mut errors),
        RegistrationStep::Division => validate_division(draft, &mut errors),
        RegistrationStep::Review => {
            validate_player(draft, &mut errors);
            validate_position(draft, &mut errors);
            validate_division(draft, &mut errors);
            if draft.accept_terms != Some(true) {
                errors.push(FieldError::new("acceptTerms", "Terms must be accepted"));
            }
        }
    }

    errors
}

/// Runs the review step and, if clean, builds the record to insert.
pub fn validate_draft(draft: &RegistrationDraft) -> Result<NewRegistration, Vec<FieldError>> {
    let errors = validate_step(RegistrationStep::Review, draft);
    if !errors.is_empty() {
        return Err(errors);
    }

    let position = draft
        .position
        .as_deref()
        .and_then(|p| p.parse::<Position>().ok())
        .ok_or_else(|| vec![FieldError::new("position", "Position is required")])?;

    let session_id = draft
        .session_id
        .ok_or_else(|| vec![FieldError::new("sessionId", "Session is required")])?;

    Ok(NewRegistration {
        session_id,
        first_name: non_empty(draft.first_name.clone()).unwrap_or_default(),
        last_name: non_empty(draft.last_name.clone()).unwrap_or_default(),
        email: non_empty(draft.email.clone())
            .unwrap_or_default()
            .to_ascii_lowercase(),
        phone: non_empty(draft.phone.clone()),
        position,
        division_id: non_empty(draft.division_id.clone()),
        team_id: non_empty(draft.team_id.clone()),
        jersey_number: draft.jersey_number.and_then(|n| i16::try_from(n).ok()),
    })
}

pub async fn create_registration(
    postgres: &PgPool,
    draft: RegistrationDraft,
) -> Result<Registration, AppError> {
    let registration = validate_draft(&draft).map_err(|errors| {
        AppError::BadRequest(
            errors
                .iter()
                .map(|e| e.message.as_str())
                .collect::<Vec<_>>()
                .join("; "),
        )
    })?;

    let session = db::session::get::get_session(registration.session_id, postgres).await?;
    if !session.is_active {
        return Err(AppError::BadRequest(format!(
            "Registration for {} is closed",
            session.name
        )));
    }

    db::registration::post::create_registration(registration, session.fee_cents, postgres).await
}

pub async fn list_registrations(
    postgres: &PgPool,
    session_id: Option<i32>,
) -> Result<Vec<Registration>, AppError> {
    db::registration::get::get_registrations(session_id, postgres).await
}

pub async fn update_registration_status(
    postgres: &PgPool,
    id: Uuid,
    status: RegistrationStatus,
) -> Result<Registration, AppError> {
    db::registration::patch::update_registration_status(id, status, postgres).await
}

fn validate_player(draft: &RegistrationDraft, errors: &mut Vec<FieldError>) {
    for (field, label, value) in [
        ("firstName", "First name", &draft.first_name),
        ("lastName", "Last name", &draft.last_name),
    ] {
        match non_empty(value.clone()) {
            None => errors.push(FieldError::new(field, format!("{label} is required"))),
            Some(name) if name.chars().count() > MAX_NAME_LENGTH => errors.push(FieldError::new(
                field,
                format!("{label} must be at most {MAX_NAME_LENGTH} characters"),
            )),
            Some(_) => {}
        }
    }

    match non_empty(draft.email.clone()) {
        None => errors.push(FieldError::new("email", "Email is required")),
        Some(email) if !is_valid_email(&email) => {
            errors.push(FieldError::new("email", "Email address is not valid"))
        }
        Some(_) => {}
    }

    if let Some(phone) = non_empty(draft.phone.clone()) {
        if !is_valid_phone(&phone) {
            errors.push(FieldError::new("phone", "Phone number is not valid"));
        }
    }
}

fn validate_position(draft: &RegistrationDraft, errors: &mut Vec<FieldError>) {
    match non_empty(draft.position.clone()) {
        None => errors.push(FieldError::new("position", "Position is required")),
        Some(position) if position.parse::<Position>().is_err() => errors.push(FieldError::new(
            "position",
            format!("Unknown position: {position}"),
        )),
        Some(_) => {}
    }

    if let Some(number) = draft.jersey_number {
        if !(0..=99).contains(&number) {
            errors.push(FieldError::new(
                "jerseyNumber",
                "Jersey number must be between 0 and 99",
            ));
        }
    }
}

fn validate_division(draft: &RegistrationDraft, errors: &mut Vec<FieldError>) {
    match draft.session_id {
        None => errors.push(FieldError::new("sessionId", "Session is required")),
        Some(id) if id <= 0 => errors.push(FieldError::new("sessionId", "Session is not valid")),
        Some(_) => {}
    }

    if non_empty(draft.team_id.clone()).is_some()
        && non_empty(draft.division_id.clone()).is_none()
    {
        errors.push(FieldError::new(
            "divisionId",
            "A division is required when requesting a team",
        ));
    }
}

fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.contains('@')
        && !email.chars().any(char::is_whitespace)
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'))
}

fn is_valid_phone(phone: &str) -> bool {
    let allowed = phone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | ' ' | '(' | ')' | '.'));
    allowed && phone.chars().filter(char::is_ascii_digit).count() >= MIN_PHONE_DIGITS
}
