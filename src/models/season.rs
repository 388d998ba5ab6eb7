use chrono::{DateTime, Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    errors::AppError,
    models::{non_empty, required_field},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Season {
    pub id: String,
    pub name: String,
    pub year: String,
    pub is_active: bool,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// A `season` document exactly as the CMS returns it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonDocument {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub name: Option<String>,
    pub year: Option<Value>,
    pub is_active: Option<bool>,
    pub status: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl TryFrom<SeasonDocument> for Season {
    type Error = AppError;

    fn try_from(doc: SeasonDocument) -> Result<Self, Self::Error> {
        let id = required_field(doc.id, "season", "_id")?;
        let name = required_field(doc.name, "season", "name")?;

        // `isActive` wins; older documents only carry a status string.
        let is_active = doc.is_active.unwrap_or_else(|| {
            doc.status
                .as_deref()
                .is_some_and(|status| status.trim().eq_ignore_ascii_case("active"))
        });

        let start_date = doc.start_date.as_deref().and_then(parse_cms_date);
        let end_date = doc.end_date.as_deref().and_then(parse_cms_date);

        let year = match doc.year {
            Some(Value::String(year)) if !year.trim().is_empty() => year.trim().to_string(),
            Some(Value::Number(year)) => year
                .as_i64()
                .map(|y| y.to_string())
                .unwrap_or_else(|| year.to_string()),
            _ => start_date
                .map(|date| date.year().to_string())
                .unwrap_or_default(),
        };

        Ok(Season {
            id,
            name,
            year,
            is_active,
            start_date,
            end_date,
        })
    }
}

/// Accepts plain dates and full RFC 3339 timestamps.
pub fn parse_cms_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.date_naive())
        })
        .or_else(|| {
            tracing::warn!("Ignoring unparseable CMS date: {}", raw);
            None
        })
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSeasonPayload {
    pub name: String,
    pub year: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSeasonPayload {
    pub name: Option<String>,
    pub year: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub is_active: Option<bool>,
}

impl UpdateSeasonPayload {
    pub fn name(&self) -> Option<String> {
        non_empty(self.name.clone())
    }
}
