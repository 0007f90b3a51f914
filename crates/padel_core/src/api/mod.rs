pub mod match_json;

pub use match_json::{
    create_match_json, game_score_display_json, match_json_schema, score_point_json,
    undo_last_point_json, ApiError, ApiResponse, CreateMatchRequest, MatchRequest, MatchResponse,
    ScoreDisplayResponse, ScorePointRequest, API_VERSION,
};
