pub mod diagnostics;
pub mod division;
pub mod filter;
pub mod health;
pub mod league;
pub mod registration;
pub mod season;

pub use division::get_active_divisions;
pub use filter::{fetch_filter_data, get_filter_options};
pub use season::{get_all_seasons, get_current_season};
