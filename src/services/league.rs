use serde_json::{Value, json};
use sqlx::PgPool;

use crate::{
    cms::{CmsClient, Mutation, Patch, QueryParams, queries},
    db,
    errors::AppError,
    models::{
        Player, Team, TeamSummary,
        non_empty,
        player::PlayerFilter,
        team::{CreateTeamPayload, TeamDocument, TeamSummaryDocument, UpdateTeamPayload},
        validate_documents,
    },
};

pub async fn get_all_teams(cms: &CmsClient) -> Result<Vec<Team>, AppError> {
    let documents: Vec<Value> = cms.query(queries::ALL_TEAMS, &QueryParams::new()).await?;
    Ok(validate_documents::<TeamDocument, _>(documents, "team"))
}

pub async fn get_team(cms: &CmsClient, id: &str) -> Result<Option<Team>, AppError> {
    let document: Option<TeamDocument> = cms
        .query(queries::TEAM_BY_ID, &QueryParams::new().with("id", id))
        .await?;

    document.map(Team::try_from).transpose()
}

pub async fn get_team_summaries(cms: &CmsClient) -> Result<Vec<TeamSummary>, AppError> {
    let documents: Vec<Value> = cms
        .query(queries::TEAM_SUMMARIES, &QueryParams::new())
        .await?;
    Ok(validate_documents::<TeamSummaryDocument, _>(documents, "team"))
}

pub async fn get_players(
    postgres: &PgPool,
    filter: &PlayerFilter,
) -> Result<Vec<Player>, AppError> {
    db::player::get::get_players(filter, postgres).await
}

pub async fn create_team(cms: &CmsClient, payload: CreateTeamPayload) -> Result<Team, AppError> {
    let name = payload.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::BadRequest("Team name is required".into()));
    }

    let team = Team {
        id: format!("team-{}", uuid::Uuid::new_v4()),
        name,
        logo: None,
        coach: non_empty(payload.coach),
        region: non_empty(payload.region),
        description: non_empty(payload.description),
        home_venue: non_empty(payload.home_venue),
        awards: clean_awards(payload.awards),
        stats: Default::default(),
    };

    cms.mutate(&[Mutation::create(json!({
        "_id": team.id,
        "_type": "team",
        "name": team.name,
        "coach": team.coach,
        "region": team.region,
        "description": team.description,
        "homeVenue": team.home_venue,
        "awards": team.awards,
        "stats": team.stats,
    }))])
    .await?;

    tracing::info!("Team created: {} (ID: {})", team.name, team.id);

    Ok(team)
}

pub async fn update_team(
    cms: &CmsClient,
    id: &str,
    payload: UpdateTeamPayload,
) -> Result<Team, AppError> {
    let mut team = get_team(cms, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Team {} not found", id)))?;

    let name = non_empty(payload.name);
    let coach = non_empty(payload.coach);
    let region = non_empty(payload.region);
    let description = non_empty(payload.description);
    let home_venue = non_empty(payload.home_venue);
    let awards = payload.awards.map(clean_awards);

    let stats_value = payload
        .stats
        .as_ref()
        .map(|stats| {
            serde_json::to_value(stats).map_err(|e| AppError::Serialization(e.to_string()))
        })
        .transpose()?;

    let patch = Patch::new(id)
        .set_opt("name", name.clone())
        .set_opt("coach", coach.clone())
        .set_opt("region", region.clone())
        .set_opt("description", description.clone())
        .set_opt("homeVenue", home_venue.clone())
        .set_opt("awards", awards.clone().map(Value::from))
        .set_opt("stats", stats_value);

    if patch.is_empty() {
        return Err(AppError::BadRequest("Nothing to update".into()));
    }

    cms.mutate(&[Mutation::patch(patch)]).await?;

    if let Some(name) = name {
        team.name = name;
    }
    team.coach = coach.or(team.coach);
    team.region = region.or(team.region);
    team.description = description.or(team.description);
    team.home_venue = home_venue.or(team.home_venue);
    if let Some(awards) = awards {
        team.awards = awards;
    }
    if let Some(stats) = payload.stats {
        team.stats = stats;
    }

    tracing::info!("Team updated: {} (ID: {})", team.name, team.id);

    Ok(team)
}

pub async fn delete_team(cms: &CmsClient, id: &str) -> Result<(), AppError> {
    get_team(cms, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Team {} not found", id)))?;

    cms.mutate(&[Mutation::delete(id)]).await?;
    tracing::info!("Team deleted: {}", id);
    Ok(())
}

fn clean_awards(awards: Vec<String>) -> Vec<String> {
    awards
        .into_iter()
        .filter_map(|award| non_empty(Some(award)))
        .collect()
}
