use chrono::{Datelike, NaiveDate};
use serde_json::{Value, json};

use crate::{
    cms::{CmsClient, Mutation, Patch, QueryParams, queries},
    errors::AppError,
    models::{
        Season,
        season::{CreateSeasonPayload, SeasonDocument, UpdateSeasonPayload},
        validate_documents,
    },
    utils::pick_current_season,
};

/// Every season, unfiltered and unsorted.
pub async fn get_all_seasons(cms: &CmsClient) -> Result<Vec<Season>, AppError> {
    let documents: Vec<Value> = cms
        .query(queries::ALL_SEASONS, &QueryParams::new())
        .await?;

    Ok(validate_documents::<SeasonDocument, _>(documents, "season"))
}

/// The active season with the most recent start date, if any.
pub async fn get_current_season(cms: &CmsClient) -> Result<Option<Season>, AppError> {
    let documents: Vec<Value> = cms
        .query(queries::CURRENT_SEASONS, &QueryParams::new())
        .await?;

    let seasons: Vec<Season> = validate_documents::<SeasonDocument, _>(documents, "season");
    Ok(pick_current_season(&seasons))
}

pub async fn get_season(cms: &CmsClient, id: &str) -> Result<Season, AppError> {
    let document: Option<SeasonDocument> = cms
        .query(queries::SEASON_BY_ID, &QueryParams::new().with("id", id))
        .await?;

    match document {
        Some(document) => Season::try_from(document),
        None => Err(AppError::NotFound(format!("Season {} not found", id))),
    }
}

pub async fn create_season(
    cms: &CmsClient,
    payload: CreateSeasonPayload,
) -> Result<Season, AppError> {
    let name = payload.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::BadRequest("Season name is required".into()));
    }
    validate_dates(payload.start_date, payload.end_date)?;

    let season = Season {
        id: format!("season-{}", uuid::Uuid::new_v4()),
        name,
        year: payload
            .year
            .map(|y| y.trim().to_string())
            .filter(|y| !y.is_empty())
            .unwrap_or_else(|| payload.start_date.year().to_string()),
        is_active: payload.is_active,
        start_date: Some(payload.start_date),
        end_date: Some(payload.end_date),
    };

    cms.mutate(&[Mutation::create(json!({
        "_id": season.id,
        "_type": "season",
        "name": season.name,
        "year": season.year,
        "isActive": season.is_active,
        "startDate": payload.start_date.to_string(),
        "endDate": payload.end_date.to_string(),
        "activeDivisions": [],
    }))])
    .await?;

    tracing::info!("Season created: {} (ID: {})", season.name, season.id);

    Ok(season)
}

pub async fn update_season(
    cms: &CmsClient,
    id: &str,
    payload: UpdateSeasonPayload,
) -> Result<Season, AppError> {
    let mut season = get_season(cms, id).await?;

    if let Some(name) = payload.name() {
        season.name = name;
    }
    if let Some(year) = payload.year.as_deref().map(str::trim).filter(|y| !y.is_empty()) {
        season.year = year.to_string();
    }
    if let Some(is_active) = payload.is_active {
        season.is_active = is_active;
    }
    if payload.start_date.is_some() {
        season.start_date = payload.start_date;
    }
    if payload.end_date.is_some() {
        season.end_date = payload.end_date;
    }
    if let (Some(start), Some(end)) = (season.start_date, season.end_date) {
        validate_dates(start, end)?;
    }

    let patch = Patch::new(id)
        .set_opt("name", payload.name())
        .set_opt("year", payload.year.as_ref().map(|_| season.year.clone()))
        .set_opt("isActive", payload.is_active)
        .set_opt("startDate", payload.start_date.map(|d| d.to_string()))
        .set_opt("endDate", payload.end_date.map(|d| d.to_string()));

    if patch.is_empty() {
        return Err(AppError::BadRequest("Nothing to update".into()));
    }

    cms.mutate(&[Mutation::patch(patch)]).await?;
    tracing::info!("Season updated: {} (ID: {})", season.name, season.id);

    Ok(season)
}

pub async fn delete_season(cms: &CmsClient, id: &str) -> Result<(), AppError> {
    get_season(cms, id).await?;
    cms.mutate(&[Mutation::delete(id)]).await?;
    tracing::info!("Season deleted: {}", id);
    Ok(())
}

/// Makes `id` the only active season, in one transaction.
pub async fn set_current_season(cms: &CmsClient, id: &str) -> Result<Season, AppError> {
    let mut season = get_season(cms, id).await?;

    let active_ids: Vec<String> = cms
        .query(queries::ACTIVE_SEASON_IDS, &QueryParams::new())
        .await?;

    let mut mutations: Vec<Mutation> = active_ids
        .iter()
        .filter(|other| other.as_str() != id)
        .map(|other| Mutation::patch(Patch::new(other.as_str()).set("isActive", false)))
        .collect();
    mutations.push(Mutation::patch(Patch::new(id).set("isActive", true)));

    cms.mutate(&mutations).await?;
    tracing::info!(
        "Season {} is now current ({} other season(s) deactivated)",
        id,
        mutations.len() - 1
    );

    season.is_active = true;
    Ok(season)
}

fn validate_dates(start: NaiveDate, end: NaiveDate) -> Result<(), AppError> {
    if end <= start {
        return Err(AppError::BadRequest(
            "End date must be after start date".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CmsConfig;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_partial_json, method, path},
    };

    async fn cms_for(server: &MockServer) -> CmsClient {
        CmsClient::new(
            &CmsConfig {
                project_id: "test".into(),
                api_host: Some(server.uri()),
                token: Some("token".into()),
                ..CmsConfig::default()
            },
            5,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn current_season_is_none_when_nothing_is_active() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": [] })))
            .mount(&server)
            .await;

        let cms = cms_for(&server).await;
        assert_eq!(get_current_season(&cms).await.unwrap(), None);
    }

    #[tokio::test]
    async fn invalid_documents_are_skipped() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "result": [
                    { "_id": "season-1", "name": "Summer", "year": "2025", "isActive": true },
                    { "name": "No id" },
                    { "_id": "season-2", "name": "Winter", "year": 2024 }
                ]
            })))
            .mount(&server)
            .await;

        let cms = cms_for(&server).await;
        let seasons = get_all_seasons(&cms).await.unwrap();

        assert_eq!(seasons.len(), 2);
        assert_eq!(seasons[1].year, "2024");
    }

    #[tokio::test]
    async fn mistyped_field_skips_only_that_season() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "result": [
                    { "_id": "s1", "name": "Summer", "year": "2025", "isActive": true },
                    { "_id": "s2", "name": "Winter", "year": "2024", "isActive": "yes" }
                ]
            })))
            .mount(&server)
            .await;

        let cms = cms_for(&server).await;
        let seasons = get_all_seasons(&cms).await.unwrap();

        assert_eq!(seasons.len(), 1);
        assert_eq!(seasons[0].id, "s1");
    }

    #[tokio::test]
    async fn rejects_inverted_dates_before_touching_the_cms() {
        let server = MockServer::start().await;
        let cms = cms_for(&server).await;

        let err = create_season(
            &cms,
            CreateSeasonPayload {
                name: "Backwards".into(),
                year: None,
                start_date: NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
                end_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
                is_active: false,
            },
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::BadRequest(_)));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn set_current_season_deactivates_the_others() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2024-01-01/data/query/production"))
            .and(wiremock::matchers::query_param("$id", "\"season-new\""))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "result": { "_id": "season-new", "name": "Summer", "year": "2025", "isActive": false }
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v2024-01-01/data/query/production"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "result": ["season-old"]
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v2024-01-01/data/mutate/production"))
            .and(body_partial_json(json!({
                "mutations": [
                    { "patch": { "id": "season-old", "set": { "isActive": false } } },
                    { "patch": { "id": "season-new", "set": { "isActive": true } } }
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "transactionId": "tx-1",
                "results": []
            })))
            .expect(1)
            .mount(&server)
            .await;

        let cms = cms_for(&server).await;
        let season = set_current_season(&cms, "season-new").await.unwrap();

        assert!(season.is_active);
    }

    #[tokio::test]
    async fn set_current_season_deactivates_legacy_status_seasons() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2024-01-01/data/query/production"))
            .and(wiremock::matchers::query_param("$id", "\"season-new\""))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "result": { "_id": "season-new", "name": "Summer", "year": "2025" }
            })))
            .mount(&server)
            .await;
        // Only the query that also matches `status == "active"` sees the legacy season.
        Mock::given(method("GET"))
            .and(path("/v2024-01-01/data/query/production"))
            .and(wiremock::matchers::query_param("query", queries::ACTIVE_SEASON_IDS))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "result": ["season-legacy"]
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v2024-01-01/data/mutate/production"))
            .and(body_partial_json(json!({
                "mutations": [
                    { "patch": { "id": "season-legacy", "set": { "isActive": false } } },
                    { "patch": { "id": "season-new", "set": { "isActive": true } } }
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "transactionId": "tx-2",
                "results": []
            })))
            .expect(1)
            .mount(&server)
            .await;

        let cms = cms_for(&server).await;
        set_current_season(&cms, "season-new").await.unwrap();

        assert!(queries::ACTIVE_SEASON_IDS.contains(r#"status == "active""#));
    }
}
