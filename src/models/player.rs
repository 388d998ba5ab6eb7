use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::{errors::AppError, models::Position};

/// Public view of a paid registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub position: Position,
    pub jersey_number: Option<i16>,
    pub team_id: Option<String>,
    pub division_id: Option<String>,
    pub session_id: i32,
}

#[derive(Debug, Clone, FromRow)]
pub struct PlayerRow {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub position: String,
    pub jersey_number: Option<i16>,
    pub team_id: Option<String>,
    pub division_id: Option<String>,
    pub session_id: i32,
}

impl TryFrom<PlayerRow> for Player {
    type Error = AppError;

    fn try_from(row: PlayerRow) -> Result<Self, Self::Error> {
        Ok(Player {
            id: row.id,
            position: row
                .position
                .parse()
                .map_err(|_| AppError::InvalidRecord(format!("Bad position in row {}", row.id)))?,
            first_name: row.first_name,
            last_name: row.last_name,
            jersey_number: row.jersey_number,
            team_id: row.team_id,
            division_id: row.division_id,
            session_id: row.session_id,
        })
    }
}

/// Query-string filters of the players listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlayerFilterParams {
    pub session: Option<i32>,
    pub season: Option<String>,
    pub division: Option<String>,
    pub team: Option<String>,
    pub position: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerFilter {
    pub session_id: Option<i32>,
    pub season_id: Option<String>,
    pub division_id: Option<String>,
    pub team_id: Option<String>,
    pub position: Option<Position>,
}

impl TryFrom<PlayerFilterParams> for PlayerFilter {
    type Error = AppError;

    fn try_from(params: PlayerFilterParams) -> Result<Self, Self::Error> {
        let blank_to_none = |value: Option<String>| {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty() && v != "all")
        };

        let position = blank_to_none(params.position)
            .map(|p| p.parse::<Position>())
            .transpose()?;

        Ok(PlayerFilter {
            session_id: params.session,
            season_id: blank_to_none(params.season),
            division_id: blank_to_none(params.division),
            team_id: blank_to_none(params.team),
            position,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_and_blank_mean_no_filter() {
        let filter = PlayerFilter::try_from(PlayerFilterParams {
            season: Some("all".into()),
            team: Some("  ".into()),
            position: Some("sg".into()),
            ..PlayerFilterParams::default()
        })
        .unwrap();

        assert_eq!(filter.season_id, None);
        assert_eq!(filter.team_id, None);
        assert_eq!(filter.position, Some(Position::ShootingGuard));
    }

    #[test]
    fn unknown_position_is_a_bad_request() {
        let err = PlayerFilter::try_from(PlayerFilterParams {
            position: Some("libero".into()),
            ..PlayerFilterParams::default()
        })
        .unwrap_err();

        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
