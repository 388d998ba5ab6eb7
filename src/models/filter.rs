use serde::{Deserialize, Serialize};

use crate::models::{DivisionSummary, Position, Season, Session, TeamSummary};

/// Selectable values for the player/team filter controls.
///
/// Rebuilt on every request; `Default` is the empty fallback, which still
/// carries the fixed position list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub sessions: Vec<Session>,
    pub seasons: Vec<Season>,
    pub divisions: Vec<DivisionSummary>,
    pub teams: Vec<TeamSummary>,
    pub positions: Vec<Position>,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            sessions: Vec::new(),
            seasons: Vec::new(),
            divisions: Vec::new(),
            teams: Vec::new(),
            positions: Position::ALL.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_options_keep_positions() {
        assert_eq!(
            serde_json::to_value(FilterOptions::default()).unwrap(),
            json!({
                "sessions": [],
                "seasons": [],
                "divisions": [],
                "teams": [],
                "positions": ["PG", "SG", "SF", "PF", "C"]
            })
        );
    }
}
