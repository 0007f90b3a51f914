pub mod match_state;
pub mod score;
pub mod settings;
pub mod team;

pub use match_state::{Match, MatchStatus, PointEvent};
pub use score::{
    create_initial_game_score, create_initial_set_score, GameScore, MatchScore, PadelPoint,
    SetScore,
};
pub use settings::{FormatPreset, MatchSettings, SettingsOverrides, SUPER_TIEBREAK_POINTS};
pub use team::{Team, TeamInfo};
