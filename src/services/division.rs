use std::collections::HashSet;

use serde_json::{Value, json};

use crate::{
    cms::{
        CmsClient, Mutation, Patch, QueryParams,
        mutations::{keyed_reference, new_key, reference},
        queries,
    },
    errors::AppError,
    models::{
        Division, DivisionSummary,
        division::{
            AttachDivisionPayload, CreateDivisionPayload, DivisionDocument,
            DivisionSummaryDocument, UpdateDivisionEntryPayload,
        },
        validate_documents,
    },
    services::season::get_season,
};

/// Divisions of the current season(s) that are active and have teams.
pub async fn get_active_divisions(cms: &CmsClient) -> Result<Vec<Division>, AppError> {
    let documents: Vec<Value> = cms
        .query(queries::ACTIVE_DIVISIONS, &QueryParams::new())
        .await?;

    let divisions = validate_documents::<DivisionDocument, _>(documents, "division");
    Ok(listed_divisions(divisions))
}

/// Keeps listed divisions, once per id. Entries arrive latest season first,
/// so a division shared by two active seasons shows the newer entry.
pub fn listed_divisions(divisions: Vec<Division>) -> Vec<Division> {
    let mut seen = HashSet::new();
    divisions
        .into_iter()
        .filter(Division::is_listed)
        .filter(|division| seen.insert(division.id.clone()))
        .collect()
}

pub async fn get_division_summaries(cms: &CmsClient) -> Result<Vec<DivisionSummary>, AppError> {
    let documents: Vec<Value> = cms
        .query(queries::ALL_DIVISIONS, &QueryParams::new())
        .await?;

    Ok(validate_documents::<DivisionSummaryDocument, _>(documents, "division"))
}

pub async fn create_division(
    cms: &CmsClient,
    payload: CreateDivisionPayload,
) -> Result<DivisionSummary, AppError> {
    let name = payload.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::BadRequest("Division name is required".into()));
    }

    let id = format!("division-{}", uuid::Uuid::new_v4());
    cms.mutate(&[Mutation::create(json!({
        "_id": id,
        "_type": "division",
        "name": name,
    }))])
    .await?;

    tracing::info!("Created division {} (ID: {})", name, id);

    Ok(DivisionSummary { id, name })
}

/// Adds a division entry to a season and returns the entry `_key`.
pub async fn attach_division(
    cms: &CmsClient,
    season_id: &str,
    payload: AttachDivisionPayload,
) -> Result<String, AppError> {
    get_season(cms, season_id).await?;

    let division: Option<DivisionSummaryDocument> = cms
        .query(
            queries::DIVISION_BY_ID,
            &QueryParams::new().with("id", payload.division_id.as_str()),
        )
        .await?;
    if division.is_none() {
        return Err(AppError::NotFound(format!(
            "Division {} not found",
            payload.division_id
        )));
    }

    ensure_teams_exist(cms, &payload.team_ids).await?;

    let key = new_key();
    let entry = json!({
        "_key": key,
        "_type": "seasonDivision",
        "division": reference(&payload.division_id),
        "status": payload.status.as_str(),
        "teams": team_references(&payload.team_ids),
    });

    let patch = Patch::new(season_id)
        .set_if_missing("activeDivisions", json!([]))
        .append("activeDivisions", vec![entry]);
    cms.mutate(&[Mutation::patch(patch)]).await?;

    tracing::info!(
        "Attached division {} to season {} (entry {})",
        payload.division_id,
        season_id,
        key
    );

    Ok(key)
}

pub async fn update_division_entry(
    cms: &CmsClient,
    season_id: &str,
    entry_key: &str,
    payload: UpdateDivisionEntryPayload,
) -> Result<(), AppError> {
    get_season(cms, season_id).await?;

    let entry = entry_path(entry_key)?;
    let mut patch = Patch::new(season_id)
        .set_opt(&format!("{entry}.status"), payload.status.map(|s| s.as_str()));

    if let Some(team_ids) = payload.team_ids {
        ensure_teams_exist(cms, &team_ids).await?;
        patch = patch.set(&format!("{entry}.teams"), Value::Array(team_references(&team_ids)));
    }

    if patch.is_empty() {
        return Err(AppError::BadRequest("Nothing to update".into()));
    }

    cms.mutate(&[Mutation::patch(patch)]).await?;
    Ok(())
}

pub async fn detach_division(
    cms: &CmsClient,
    season_id: &str,
    entry_key: &str,
) -> Result<(), AppError> {
    get_season(cms, season_id).await?;

    let patch = Patch::new(season_id).unset(entry_path(entry_key)?);
    cms.mutate(&[Mutation::patch(patch)]).await?;

    tracing::info!("Detached division entry {} from season {}", entry_key, season_id);
    Ok(())
}

fn entry_path(entry_key: &str) -> Result<String, AppError> {
    // Keys end up inside a GROQ path expression.
    if entry_key.is_empty()
        || !entry_key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(AppError::BadRequest(format!(
            "Invalid division entry key: {entry_key}"
        )));
    }
    Ok(format!("activeDivisions[_key==\"{entry_key}\"]"))
}

fn team_references(team_ids: &[String]) -> Vec<Value> {
    team_ids.iter().map(|id| keyed_reference(id)).collect()
}

async fn ensure_teams_exist(cms: &CmsClient, team_ids: &[String]) -> Result<(), AppError> {
    if team_ids.is_empty() {
        return Ok(());
    }

    let found: Vec<String> = cms
        .query(
            queries::TEAM_IDS_IN,
            &QueryParams::new().with("ids", team_ids.to_vec()),
        )
        .await?;

    let missing: Vec<&str> = team_ids
        .iter()
        .filter(|id| !found.contains(id))
        .map(String::as_str)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::NotFound(format!(
            "Unknown team(s): {}",
            missing.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CmsConfig;
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path},
    };

    fn entry(id: &str, status: &str, team_count: usize) -> Value {
        let teams: Vec<Value> = (0..team_count)
            .map(|i| json!({ "_id": format!("{id}-team-{i}"), "name": format!("Team {i}") }))
            .collect();
        json!({
            "_key": format!("key-{id}"),
            "_id": id,
            "name": id.to_uppercase(),
            "status": status,
            "teams": teams
        })
    }

    #[tokio::test]
    async fn only_active_divisions_with_teams_are_returned() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2024-01-01/data/query/production"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "result": [
                    entry("open", "active", 4),
                    entry("empty-a", "active", 0),
                    entry("masters", "active", 2),
                    entry("retired", "inactive", 3),
                    entry("empty-b", "active", 0),
                    entry("youth", "active", 1),
                ]
            })))
            .mount(&server)
            .await;

        let cms = CmsClient::new(
            &CmsConfig {
                project_id: "test".into(),
                api_host: Some(server.uri()),
                ..CmsConfig::default()
            },
            5,
        )
        .unwrap();

        let ids: Vec<String> = get_active_divisions(&cms)
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.id)
            .collect();

        assert_eq!(ids, vec!["open", "masters", "youth"]);
    }

    #[tokio::test]
    async fn shared_division_is_listed_once_and_bad_entries_are_skipped() {
        let server = MockServer::start().await;
        let mut newer = entry("open", "active", 3);
        newer["_key"] = json!("key-2025");
        let mut older = entry("open", "active", 1);
        older["_key"] = json!("key-2024");
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "result": [
                    newer,
                    { "_key": "bad", "_id": "masters", "name": "Masters", "status": "active", "teams": "lots" },
                    older,
                    entry("youth", "active", 1),
                ]
            })))
            .mount(&server)
            .await;

        let cms = CmsClient::new(
            &CmsConfig {
                project_id: "test".into(),
                api_host: Some(server.uri()),
                ..CmsConfig::default()
            },
            5,
        )
        .unwrap();

        let divisions = get_active_divisions(&cms).await.unwrap();

        let ids: Vec<&str> = divisions.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["open", "youth"]);
        assert_eq!(divisions[0].entry_key.as_deref(), Some("key-2025"));
        assert_eq!(divisions[0].teams.len(), 3);
    }

    #[test]
    fn entry_keys_are_restricted() {
        assert_eq!(
            entry_path("a1b2c3").unwrap(),
            "activeDivisions[_key==\"a1b2c3\"]"
        );
        assert!(entry_path("x\"] | *[").is_err());
        assert!(entry_path("").is_err());
    }
}
