pub mod admin;
pub mod debug;
pub mod division;
pub mod filter;
pub mod health;
pub mod player;
pub mod registration;
pub mod season;
pub mod team;

pub use debug::environment_handler;
pub use division::get_divisions_handler;
pub use filter::get_filters_handler;
pub use health::health_handler;
pub use player::get_players_handler;
pub use registration::{create_registration_handler, validate_step_handler};
pub use season::{get_current_season_handler, get_seasons_handler};
pub use team::{get_team_handler, get_teams_handler};
