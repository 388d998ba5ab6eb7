use sqlx::PgPool;

use crate::{
    errors::AppError,
    models::{
        Player, RegistrationStatus,
        player::{PlayerFilter, PlayerRow},
    },
};

/// Paid registrations matching every provided filter.
pub async fn get_players(
    filter: &PlayerFilter,
    postgres: &PgPool,
) -> Result<Vec<Player>, AppError> {
    let rows = sqlx::query_as::<_, PlayerRow>(
        "SELECT r.id, r.first_name, r.last_name, r.position, r.jersey_number,
                r.team_id, r.division_id, r.session_id
			FROM registrations r
			JOIN sessions s ON s.id = r.session_id
			WHERE r.status = $1
			  AND ($2::INTEGER IS NULL OR r.session_id = $2)
			  AND ($3::TEXT IS NULL OR s.season_id = $3)
			  AND ($4::TEXT IS NULL OR r.division_id = $4)
			  AND ($5::TEXT IS NULL OR r.team_id = $5)
			  AND ($6::TEXT IS NULL OR r.position = $6)
			ORDER BY r.last_name, r.first_name",
    )
    .bind(RegistrationStatus::Paid.as_str())
    .bind(filter.session_id)
    .bind(&filter.season_id)
    .bind(&filter.division_id)
    .bind(&filter.team_id)
    .bind(filter.position.map(|p| p.code()))
    .fetch_all(postgres)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to fetch players: {}", e)))?;

    rows.into_iter().map(Player::try_from).collect()
}
