pub mod delete;
pub mod get;
pub mod patch;
pub mod post;

pub(crate) const SESSION_COLUMNS: &str =
    "id, season_id, name, start_date, end_date, is_active, fee_cents, created_at";
