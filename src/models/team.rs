use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    errors::AppError,
    models::{non_empty, required_field},
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TeamStats {
    pub wins: u32,
    pub losses: u32,
    pub points_for: u32,
    pub points_against: u32,
}

impl TeamStats {
    fn from_value(value: Option<Value>) -> Self {
        let Some(Value::Object(map)) = value else {
            return Self::default();
        };

        let stat = |key: &str| {
            map.get(key)
                .and_then(|v| v.as_u64().or_else(|| v.as_f64().map(|f| f.max(0.0) as u64)))
                .map(|n| n.min(u32::MAX as u64) as u32)
                .unwrap_or(0)
        };

        Self {
            wins: stat("wins"),
            losses: stat("losses"),
            points_for: stat("pointsFor"),
            points_against: stat("pointsAgainst"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: String,
    pub name: String,
    pub logo: Option<String>,
    pub coach: Option<String>,
    pub region: Option<String>,
    pub description: Option<String>,
    pub home_venue: Option<String>,
    pub awards: Vec<String>,
    pub stats: TeamStats,
}

/// Minimal team shape used inside divisions and filter options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamSummary {
    pub id: String,
    pub name: String,
    pub logo: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamDocument {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub name: Option<String>,
    pub logo: Option<String>,
    pub coach: Option<String>,
    pub region: Option<String>,
    pub description: Option<String>,
    pub home_venue: Option<String>,
    pub awards: Option<Vec<Value>>,
    pub stats: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TeamSummaryDocument {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub name: Option<String>,
    pub logo: Option<String>,
}

impl TryFrom<TeamDocument> for Team {
    type Error = AppError;

    fn try_from(doc: TeamDocument) -> Result<Self, Self::Error> {
        // Awards are plain strings in newer documents, `{title}` objects in older ones.
        let awards = doc
            .awards
            .unwrap_or_default()
            .into_iter()
            .filter_map(|award| match award {
                Value::String(title) => non_empty(Some(title)),
                Value::Object(map) => map
                    .get("title")
                    .or_else(|| map.get("name"))
                    .and_then(Value::as_str)
                    .and_then(|title| non_empty(Some(title.to_string()))),
                _ => None,
            })
            .collect();

        Ok(Team {
            id: required_field(doc.id, "team", "_id")?,
            name: required_field(doc.name, "team", "name")?,
            logo: non_empty(doc.logo),
            coach: non_empty(doc.coach),
            region: non_empty(doc.region),
            description: non_empty(doc.description),
            home_venue: non_empty(doc.home_venue),
            awards,
            stats: TeamStats::from_value(doc.stats),
        })
    }
}

impl TryFrom<TeamSummaryDocument> for TeamSummary {
    type Error = AppError;

    fn try_from(doc: TeamSummaryDocument) -> Result<Self, Self::Error> {
        Ok(TeamSummary {
            id: required_field(doc.id, "team", "_id")?,
            name: required_field(doc.name, "team", "name")?,
            logo: non_empty(doc.logo),
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTeamPayload {
    pub name: String,
    pub coach: Option<String>,
    pub region: Option<String>,
    pub description: Option<String>,
    pub home_venue: Option<String>,
    #[serde(default)]
    pub awards: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTeamPayload {
    pub name: Option<String>,
    pub coach: Option<String>,
    pub region: Option<String>,
    pub description: Option<String>,
    pub home_venue: Option<String>,
    pub awards: Option<Vec<String>>,
    pub stats: Option<TeamStats>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn coerces_loose_team_document() {
        let doc: TeamDocument = serde_json::from_value(json!({
            "_id": "team-hawks",
            "name": "Hawks",
            "coach": "  ",
            "homeVenue": "Eastside Gym",
            "awards": ["2024 Champions", { "title": "Fair Play" }, 7, null],
            "stats": { "wins": 8, "losses": 2.0, "pointsFor": "n/a" }
        }))
        .unwrap();

        let team = Team::try_from(doc).unwrap();

        assert_eq!(team.coach, None);
        assert_eq!(team.home_venue.as_deref(), Some("Eastside Gym"));
        assert_eq!(team.awards, vec!["2024 Champions", "Fair Play"]);
        assert_eq!(team.stats.wins, 8);
        assert_eq!(team.stats.losses, 2);
        assert_eq!(team.stats.points_for, 0);
    }

    #[test]
    fn team_without_name_is_rejected() {
        let doc = TeamDocument {
            id: Some("team-x".into()),
            ..TeamDocument::default()
        };
        assert!(Team::try_from(doc).is_err());
    }
}
