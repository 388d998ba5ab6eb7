pub mod admin;
pub mod diagnostics;
pub mod division;
pub mod filter;
pub mod health;
pub mod player;
pub mod position;
pub mod registration;
pub mod season;
pub mod session;
pub mod team;

pub use division::{Division, DivisionStatus, DivisionSummary};
pub use filter::FilterOptions;
pub use player::Player;
pub use position::Position;
pub use registration::{Registration, RegistrationStatus};
pub use season::Season;
pub use session::Session;
pub use team::{Team, TeamSummary};

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::errors::AppError;

/// Converts raw CMS documents into validated models one at a time, dropping
/// (and logging) the ones that do not fit the schema.
pub fn validate_documents<D, T>(documents: Vec<Value>, kind: &str) -> Vec<T>
where
    D: DeserializeOwned,
    T: TryFrom<D, Error = AppError>,
{
    documents
        .into_iter()
        .filter_map(|raw| {
            let parsed = serde_json::from_value::<D>(raw)
                .map_err(|e| AppError::InvalidRecord(format!("unexpected {kind} shape: {e}")))
                .and_then(T::try_from);

            match parsed {
                Ok(model) => Some(model),
                Err(e) => {
                    tracing::warn!("Skipping invalid {} document: {}", kind, e);
                    None
                }
            }
        })
        .collect()
}

pub(crate) fn required_field(
    value: Option<String>,
    kind: &str,
    field: &str,
) -> Result<String, AppError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::InvalidRecord(format!("{kind} document is missing `{field}`")))
}

pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
