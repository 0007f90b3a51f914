use super::score::MatchScore;
use super::settings::MatchSettings;
use super::team::{Team, TeamInfo};
use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    #[default]
    InProgress,
    Completed,
}

/// One accepted point. `score_snapshot` is the score *before* the point,
/// so restoring it undoes the point exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PointEvent {
    pub team: Team,
    pub timestamp: DateTime<Utc>,
    pub score_snapshot: MatchScore,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Match {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub status: MatchStatus,
    pub team_a: TeamInfo,
    pub team_b: TeamInfo,
    pub score: MatchScore,
    /// Chronological, one entry per accepted point.
    #[serde(default)]
    pub point_history: Vec<PointEvent>,
    pub settings: MatchSettings,
}

impl Match {
    pub fn new(
        id: impl Into<String>,
        created_at: DateTime<Utc>,
        team_a: TeamInfo,
        team_b: TeamInfo,
        settings: MatchSettings,
        serving_team: Team,
    ) -> Self {
        Self {
            id: id.into(),
            created_at,
            status: MatchStatus::InProgress,
            team_a,
            team_b,
            score: MatchScore::new(serving_team),
            point_history: Vec::new(),
            settings,
        }
    }

    pub fn team(&self, team: Team) -> &TeamInfo {
        match team {
            Team::A => &self.team_a,
            Team::B => &self.team_b,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == MatchStatus::Completed
    }

    pub fn can_undo(&self) -> bool {
        !self.point_history.is_empty()
    }

    pub fn points_played(&self) -> usize {
        self.point_history.len()
    }

    pub fn last_point(&self) -> Option<&PointEvent> {
        self.point_history.last()
    }
}
