//! # padel_core - Padel/Tennis Scoring Engine
//!
//! Point-by-point scoring for doubles padel and tennis matches, with
//! snapshot-based undo, storage and update fan-out around it.
//!
//! ## Features
//! - Pure, deterministic transitions: `score_point`, `undo_last_point`
//! - Golden point, configurable tiebreaks and a super tiebreak deciding set
//! - Serve rotation across both partners of each pair
//! - JSON API, compressed match files and in-process subscriptions

pub mod api;
pub mod config;
pub mod display;
pub mod engine;
pub mod error;
pub mod models;
pub mod realtime;
pub mod save;
pub mod service;

// Re-export main API functions
pub use api::{
    create_match_json, game_score_display_json, score_point_json, undo_last_point_json,
    ApiError, ApiResponse,
};
pub use config::ServiceConfig;
pub use display::{get_game_score_display, match_summary, serving_display, GameScoreDisplay};
pub use engine::{create_match, score_point, undo_last_point};
pub use error::{MatchError, Result};
pub use models::{
    FormatPreset, GameScore, Match, MatchScore, MatchSettings, MatchStatus, PadelPoint,
    PointEvent, SetScore, SettingsOverrides, Team, TeamInfo,
};
pub use realtime::{MatchHub, Subscription, GLOBAL_HUB};
pub use save::{FileMatchStore, MatchStore, MemoryMatchStore, SaveError};
pub use service::MatchService;
