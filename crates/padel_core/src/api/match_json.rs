//! JSON API for match operations
//!
//! String in, string out. Every response is an [`ApiResponse`] envelope;
//! malformed requests come back as structured errors, never panics.

use crate::display::{
    get_game_score_display, match_summary, serving_display, GameScoreDisplay, ServingDisplay,
};
use crate::engine;
use crate::models::{FormatPreset, Match, MatchSettings, SettingsOverrides, Team, TeamInfo};
use chrono::{DateTime, Utc};
use schemars::schema::RootSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, error, info, warn};

/// API version for schema compatibility
pub const API_VERSION: &str = "v1";

pub const DEFAULT_TEAM_A_NAME: &str = "Team A";
pub const DEFAULT_TEAM_B_NAME: &str = "Team B";

/// Ceiling for game and tiebreak counters in a caller-supplied match.
/// No playable set or tiebreak gets near it.
pub const MAX_SCORE_COUNTER: u32 = 10_000;

/// Standard API response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiError>,
    pub schema_version: String,
    pub timestamp: DateTime<Utc>,
}

/// Structured API error with codes and details
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
    pub details: Option<HashMap<String, serde_json::Value>>,
}

impl ApiError {
    pub fn new(code: &str, message: &str) -> Self {
        Self { code: code.to_string(), message: message.to_string(), details: None }
    }

    pub fn with_detail(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.details.get_or_insert_with(HashMap::new).insert(key.to_string(), value.into());
        self
    }

    fn invalid_json(e: serde_json::Error) -> Self {
        Self::new("INVALID_JSON", &format!("Invalid JSON format: {}", e))
    }
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            schema_version: API_VERSION.to_string(),
            timestamp: Utc::now(),
        }
    }

    pub fn error(error: ApiError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
            schema_version: API_VERSION.to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Match creation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMatchRequest {
    pub schema_version: Option<String>,
    pub team_a: TeamInfo,
    pub team_b: TeamInfo,
    /// Applied first; `settings` overrides it field by field.
    pub preset: Option<FormatPreset>,
    pub settings: Option<SettingsOverrides>,
    /// `"a"` or `"b"`, defaults to `"a"`.
    pub serving_team: Option<String>,
}

/// Point scoring request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScorePointRequest {
    pub schema_version: Option<String>,
    #[serde(rename = "match")]
    pub match_data: Match,
    /// `"a"` or `"b"`
    pub team: String,
}

/// Request carrying only a match: undo and display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRequest {
    pub schema_version: Option<String>,
    #[serde(rename = "match")]
    pub match_data: Match,
}

/// Match state response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResponse {
    #[serde(rename = "match")]
    pub match_data: Match,
    /// False when the request was a quiet no-op.
    pub changed: bool,
}

/// Scoreboard response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreDisplayResponse {
    pub game: GameScoreDisplay,
    pub serving: ServingDisplay,
    pub summary: String,
}

impl CreateMatchRequest {
    /// Validate the creation request
    pub fn validate(&self) -> Result<(), ApiError> {
        for (side, team) in [("team_a", &self.team_a), ("team_b", &self.team_b)] {
            for (slot, player) in [("player_1", &team.player_1), ("player_2", &team.player_2)] {
                if player.trim().is_empty() {
                    return Err(ApiError::new("INVALID_TEAM", "All four player names are required")
                        .with_detail("field", format!("{}.{}", side, slot)));
                }
            }
        }

        if let Some(serving) = &self.serving_team {
            parse_team(serving)?;
        }

        MatchSettings::with_overrides(&self.overrides())
            .validate()
            .map_err(|msg| ApiError::new("INVALID_SETTINGS", &msg))
    }

    /// Preset overrides with explicit settings layered on top.
    pub fn overrides(&self) -> SettingsOverrides {
        let preset = self.preset.unwrap_or_default().overrides();
        match &self.settings {
            Some(settings) => preset.merged(settings),
            None => preset,
        }
    }

    /// Trimmed teams, blank team names replaced by the defaults.
    pub fn teams(&self) -> (TeamInfo, TeamInfo) {
        (normalize_team(&self.team_a, DEFAULT_TEAM_A_NAME), normalize_team(&self.team_b, DEFAULT_TEAM_B_NAME))
    }
}

fn normalize_team(team: &TeamInfo, default_name: &str) -> TeamInfo {
    let name = team.name.trim();
    TeamInfo::new(
        if name.is_empty() { default_name } else { name },
        team.player_1.trim(),
        team.player_2.trim(),
    )
}

fn parse_team(value: &str) -> Result<Team, ApiError> {
    Team::parse(value).ok_or_else(|| {
        ApiError::new("INVALID_TEAM", &format!("Team must be \"a\" or \"b\", got {:?}", value))
    })
}

/// Shape checks on a match handed in by the caller. The engine indexes
/// into `sets` and assumes sane settings, so anything else is rejected.
fn check_match(m: &Match) -> Result<(), ApiError> {
    let score = &m.score;
    if score.sets.is_empty() || score.current_set >= score.sets.len() {
        return Err(ApiError::new("INVALID_MATCH", "current_set does not point at a set")
            .with_detail("match_id", m.id.as_str()));
    }
    if m.is_completed() != score.winner.is_some() {
        return Err(ApiError::new("INVALID_MATCH", "status and winner disagree")
            .with_detail("match_id", m.id.as_str()));
    }

    let game = &score.current_game;
    let mut counters = score
        .sets
        .iter()
        .flat_map(|set| [set.games_a, set.games_b])
        .chain([game.tiebreak_points_a, game.tiebreak_points_b]);
    if let Some(value) = counters.find(|&value| value > MAX_SCORE_COUNTER) {
        return Err(ApiError::new("INVALID_MATCH", "game or tiebreak count out of range")
            .with_detail("match_id", m.id.as_str())
            .with_detail("value", value));
    }

    for team in Team::BOTH {
        let player = score.serving_player(team);
        if !matches!(player, 1 | 2) {
            return Err(ApiError::new("INVALID_MATCH", "serving player must be 1 or 2")
                .with_detail("match_id", m.id.as_str())
                .with_detail("team", team.to_string())
                .with_detail("value", player));
        }
    }

    m.settings.validate().map_err(|msg| ApiError::new("INVALID_SETTINGS", &msg))
}

fn parse_request<T: DeserializeOwned>(request_json: &str, kind: &str) -> Result<T, ApiError> {
    serde_json::from_str(request_json).map_err(|e| {
        error!("Failed to parse {}: {}", kind, e);
        ApiError::invalid_json(e)
    })
}

fn respond<T: Serialize>(result: Result<T, ApiError>) -> String {
    let response = match result {
        Ok(data) => ApiResponse::success(data),
        Err(error) => ApiResponse::error(error),
    };
    serde_json::to_string(&response).unwrap_or_else(|_| "{}".to_string())
}

/// Create a new match from a [`CreateMatchRequest`].
pub fn create_match_json(request_json: &str) -> String {
    info!("Processing match creation request");
    respond(create_match_inner(request_json))
}

fn create_match_inner(request_json: &str) -> Result<MatchResponse, ApiError> {
    let request: CreateMatchRequest = parse_request(request_json, "CreateMatchRequest")?;

    if let Err(error) = request.validate() {
        warn!("Match creation request validation failed: {:?}", error);
        return Err(error);
    }

    let serving_team = match &request.serving_team {
        Some(value) => parse_team(value)?,
        None => Team::A,
    };
    let (team_a, team_b) = request.teams();
    let created = engine::create_match(team_a, team_b, &request.overrides(), serving_team);

    info!("Created match {} ({} vs {})", created.id, created.team_a.name, created.team_b.name);
    Ok(MatchResponse { match_data: created, changed: true })
}

/// Award a point. A completed match comes back with `changed: false`.
pub fn score_point_json(request_json: &str) -> String {
    respond(score_point_inner(request_json))
}

fn score_point_inner(request_json: &str) -> Result<MatchResponse, ApiError> {
    let request: ScorePointRequest = parse_request(request_json, "ScorePointRequest")?;
    let team = parse_team(&request.team)?;
    check_match(&request.match_data)?;

    let before = request.match_data.points_played();
    let next = engine::score_point(&request.match_data, team);
    let changed = next.points_played() != before;
    debug!("Point to {} on match {} (changed: {})", team, next.id, changed);
    Ok(MatchResponse { match_data: next, changed })
}

/// Revert the latest point. An empty history comes back with `changed: false`.
pub fn undo_last_point_json(request_json: &str) -> String {
    respond(undo_last_point_inner(request_json))
}

fn undo_last_point_inner(request_json: &str) -> Result<MatchResponse, ApiError> {
    let request: MatchRequest = parse_request(request_json, "MatchRequest")?;
    check_match(&request.match_data)?;

    let changed = request.match_data.can_undo();
    let next = engine::undo_last_point(&request.match_data);
    debug!("Undo on match {} (changed: {})", next.id, changed);
    Ok(MatchResponse { match_data: next, changed })
}

/// Scoreboard labels for the match's current game.
pub fn game_score_display_json(request_json: &str) -> String {
    respond(game_score_display_inner(request_json))
}

fn game_score_display_inner(request_json: &str) -> Result<ScoreDisplayResponse, ApiError> {
    let request: MatchRequest = parse_request(request_json, "MatchRequest")?;
    check_match(&request.match_data)?;

    let m = &request.match_data;
    Ok(ScoreDisplayResponse {
        game: get_game_score_display(&m.score.current_game),
        serving: serving_display(&m.score),
        summary: match_summary(m),
    })
}

/// JSON Schema of [`Match`], for clients validating stored or relayed matches.
pub fn match_json_schema() -> RootSchema {
    schemars::schema_for!(Match)
}
