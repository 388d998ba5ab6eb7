pub mod get;
pub mod patch;
pub mod post;

pub(crate) const REGISTRATION_COLUMNS: &str = "id, session_id, first_name, last_name, email, phone, position, \
    division_id, team_id, jersey_number, status, amount_due_cents, created_at";
