pub mod season;

pub use season::{format_season_year, get_active_seasons, pick_current_season, sort_seasons_by_date};
