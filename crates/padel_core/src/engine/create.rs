use crate::models::{Match, MatchSettings, SettingsOverrides, Team, TeamInfo};
use chrono::Utc;
use uuid::Uuid;

const MATCH_ID_LEN: usize = 10;

/// Short, URL-friendly match id.
pub fn new_match_id() -> String {
    Uuid::new_v4().simple().to_string()[..MATCH_ID_LEN].to_string()
}

/// Fresh match: one empty set, game at 0-0, `serving_team` to serve first.
///
/// `overrides` are merged over the default rule set. They are not
/// validated here.
pub fn create_match(
    team_a: TeamInfo,
    team_b: TeamInfo,
    overrides: &SettingsOverrides,
    serving_team: Team,
) -> Match {
    let settings = MatchSettings::with_overrides(overrides);
    let created = Match::new(new_match_id(), Utc::now(), team_a, team_b, settings, serving_team);
    log::info!(
        "Created match {}: {} vs {} ({:?})",
        created.id,
        created.team_a.name,
        created.team_b.name,
        settings
    );
    created
}
