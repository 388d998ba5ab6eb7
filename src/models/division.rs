use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    errors::AppError,
    models::{TeamSummary, non_empty, required_field, team::TeamSummaryDocument, validate_documents},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DivisionStatus {
    Active,
    #[default]
    Inactive,
}

impl DivisionStatus {
    /// Anything other than "active" counts as inactive.
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw {
            Some(status) if status.trim().eq_ignore_ascii_case("active") => DivisionStatus::Active,
            _ => DivisionStatus::Inactive,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DivisionStatus::Active => "active",
            DivisionStatus::Inactive => "inactive",
        }
    }
}

/// A division as attached to a season, with its teams resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Division {
    pub id: String,
    pub name: String,
    pub status: DivisionStatus,
    pub teams: Vec<TeamSummary>,
    /// `_key` of the season's `activeDivisions` entry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_key: Option<String>,
}

impl Division {
    pub fn is_listed(&self) -> bool {
        self.status == DivisionStatus::Active && !self.teams.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DivisionSummary {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DivisionDocument {
    #[serde(rename = "_key")]
    pub key: Option<String>,
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub name: Option<String>,
    pub status: Option<String>,
    /// Dangling references dereference to `null`.
    pub teams: Option<Vec<Value>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DivisionSummaryDocument {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub name: Option<String>,
}

impl TryFrom<DivisionDocument> for Division {
    type Error = AppError;

    fn try_from(doc: DivisionDocument) -> Result<Self, Self::Error> {
        let teams = doc
            .teams
            .unwrap_or_default()
            .into_iter()
            .filter(|team| !team.is_null())
            .collect::<Vec<_>>();

        Ok(Division {
            id: required_field(doc.id, "division", "_id")?,
            name: required_field(doc.name, "division", "name")?,
            status: DivisionStatus::from_raw(doc.status.as_deref()),
            teams: validate_documents::<TeamSummaryDocument, _>(teams, "team"),
            entry_key: non_empty(doc.key),
        })
    }
}

impl TryFrom<DivisionSummaryDocument> for DivisionSummary {
    type Error = AppError;

    fn try_from(doc: DivisionSummaryDocument) -> Result<Self, Self::Error> {
        Ok(DivisionSummary {
            id: required_field(doc.id, "division", "_id")?,
            name: required_field(doc.name, "division", "name")?,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateDivisionPayload {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachDivisionPayload {
    pub division_id: String,
    #[serde(default)]
    pub status: DivisionStatus,
    #[serde(default)]
    pub team_ids: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDivisionEntryPayload {
    pub status: Option<DivisionStatus>,
    pub team_ids: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_status_is_inactive() {
        assert_eq!(DivisionStatus::from_raw(Some("ACTIVE ")), DivisionStatus::Active);
        assert_eq!(DivisionStatus::from_raw(Some("archived")), DivisionStatus::Inactive);
        assert_eq!(DivisionStatus::from_raw(None), DivisionStatus::Inactive);
    }

    #[test]
    fn dangling_team_references_are_dropped() {
        let doc: DivisionDocument = serde_json::from_value(json!({
            "_key": "a1b2",
            "_id": "division-open",
            "name": "Open",
            "status": "active",
            "teams": [null, { "_id": "team-1", "name": "Hawks" }, { "_id": "team-2" }]
        }))
        .unwrap();

        let division = Division::try_from(doc).unwrap();

        assert_eq!(division.teams.len(), 1);
        assert_eq!(division.entry_key.as_deref(), Some("a1b2"));
        assert!(division.is_listed());
    }

    #[test]
    fn mistyped_team_does_not_drop_the_division() {
        let doc: DivisionDocument = serde_json::from_value(json!({
            "_id": "division-open",
            "name": "Open",
            "status": "active",
            "teams": [{ "_id": "team-1", "name": "Hawks" }, { "_id": "team-2", "name": 42 }]
        }))
        .unwrap();

        let division = Division::try_from(doc).unwrap();

        assert_eq!(division.teams.len(), 1);
        assert_eq!(division.teams[0].id, "team-1");
    }
}
