use std::cmp::Reverse;

use crate::models::Season;

/// Most recent start date first. Stable, and seasons without a start date go
/// last. Returns a new vector; the input is left untouched.
pub fn sort_seasons_by_date(seasons: &[Season]) -> Vec<Season> {
    let mut sorted = seasons.to_vec();
    // `None < Some(_)`, so reversing puts undated seasons at the end.
    sorted.sort_by_key(|season| Reverse(season.start_date));
    sorted
}

/// Seasons flagged `is_active`, in their original order.
pub fn get_active_seasons(seasons: &[Season]) -> Vec<Season> {
    seasons
        .iter()
        .filter(|season| season.is_active)
        .cloned()
        .collect()
}

pub fn format_season_year(season: &Season) -> String {
    season.year.clone()
}

/// The season treated as current: the active one that started last.
pub fn pick_current_season(seasons: &[Season]) -> Option<Season> {
    sort_seasons_by_date(&get_active_seasons(seasons))
        .into_iter()
        .next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn season(id: &str, start: Option<(i32, u32, u32)>, is_active: bool) -> Season {
        Season {
            id: id.to_string(),
            name: format!("Season {id}"),
            year: start.map(|(y, _, _)| y.to_string()).unwrap_or_default(),
            is_active,
            start_date: start.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
            end_date: None,
        }
    }

    #[test]
    fn sorts_most_recent_first_and_undated_last() {
        let seasons = vec![
            season("a", Some((2023, 1, 1)), false),
            season("b", None, false),
            season("c", Some((2025, 6, 1)), true),
            season("d", Some((2024, 3, 15)), false),
        ];

        let ids: Vec<_> = sort_seasons_by_date(&seasons)
            .into_iter()
            .map(|s| s.id)
            .collect();

        assert_eq!(ids, vec!["c", "d", "a", "b"]);
        assert_eq!(seasons[0].id, "a");
    }

    #[test]
    fn equal_dates_keep_input_order() {
        let seasons = vec![
            season("first", Some((2024, 1, 1)), false),
            season("second", Some((2024, 1, 1)), false),
        ];

        let sorted = sort_seasons_by_date(&seasons);
        assert_eq!(sorted[0].id, "first");
        assert_eq!(sorted[1].id, "second");
    }

    #[test]
    fn current_season_is_latest_active() {
        let seasons = vec![
            season("old", Some((2022, 1, 1)), true),
            season("new", Some((2025, 1, 1)), true),
            season("future", Some((2026, 1, 1)), false),
        ];

        assert_eq!(pick_current_season(&seasons).unwrap().id, "new");
        assert!(pick_current_season(&[season("x", None, false)]).is_none());
    }
}
