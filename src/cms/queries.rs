//! GROQ query strings. Field names here are the contract with the CMS schema.

/// Seasons whose `isActive` flag is set, or legacy documents that only carry
/// `status: "active"`.
macro_rules! current_season_filter {
    () => {
        r#"_type == "season" && (isActive == true || (!defined(isActive) && status == "active"))"#
    };
}

macro_rules! season_projection {
    () => {
        r#"{ _id, name, year, isActive, status, startDate, endDate }"#
    };
}

macro_rules! team_projection {
    () => {
        r#"{ _id, name, "logo": logo.asset->url, coach, region, description, homeVenue, awards, stats }"#
    };
}

macro_rules! team_summary_projection {
    () => {
        r#"{ _id, name, "logo": logo.asset->url }"#
    };
}

pub const ALL_SEASONS: &str = concat!(r#"*[_type == "season"]"#, season_projection!());

pub const CURRENT_SEASONS: &str = concat!(
    "*[",
    current_season_filter!(),
    "] | order(startDate desc)",
    season_projection!()
);

pub const SEASON_BY_ID: &str = concat!(
    r#"*[_type == "season" && _id == $id][0]"#,
    season_projection!()
);

pub const ACTIVE_SEASON_IDS: &str = concat!("*[", current_season_filter!(), "]._id");

pub const ACTIVE_DIVISIONS: &str = concat!(
    "*[",
    current_season_filter!(),
    r#"] | order(startDate desc).activeDivisions[]{ _key, "_id": division->_id, "name": division->name, status, "teams": teams[]->"#,
    team_summary_projection!(),
    " }"
);

pub const ALL_DIVISIONS: &str = r#"*[_type == "division"] | order(name asc){ _id, name }"#;

pub const DIVISION_BY_ID: &str = r#"*[_type == "division" && _id == $id][0]{ _id, name }"#;

pub const ALL_TEAMS: &str = concat!(
    r#"*[_type == "team"] | order(name asc)"#,
    team_projection!()
);

pub const TEAM_BY_ID: &str = concat!(
    r#"*[_type == "team" && _id == $id][0]"#,
    team_projection!()
);

pub const TEAM_SUMMARIES: &str = concat!(
    r#"*[_type == "team"] | order(name asc)"#,
    team_summary_projection!()
);

pub const TEAM_IDS_IN: &str = r#"*[_type == "team" && _id in $ids]._id"#;
