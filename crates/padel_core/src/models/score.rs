//! Score tree: `MatchScore -> [SetScore] -> GameScore`.
//!
//! Plain owned values. Cloning a `MatchScore` yields a fully independent
//! copy, which is what the undo history stores.

use super::team::Team;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Point label inside a regular (non-tiebreak) game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
pub enum PadelPoint {
    #[default]
    #[serde(rename = "0")]
    Love,
    #[serde(rename = "15")]
    Fifteen,
    #[serde(rename = "30")]
    Thirty,
    #[serde(rename = "40")]
    Forty,
    #[serde(rename = "AD")]
    Advantage,
}

impl PadelPoint {
    /// Next label on the 0 → 15 → 30 → 40 ladder. 40 and AD are terminal;
    /// leaving them is decided by the game rules, not the ladder.
    pub const fn next(self) -> Self {
        match self {
            PadelPoint::Love => PadelPoint::Fifteen,
            PadelPoint::Fifteen => PadelPoint::Thirty,
            PadelPoint::Thirty => PadelPoint::Forty,
            other => other,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            PadelPoint::Love => "0",
            PadelPoint::Fifteen => "15",
            PadelPoint::Thirty => "30",
            PadelPoint::Forty => "40",
            PadelPoint::Advantage => "AD",
        }
    }
}

impl fmt::Display for PadelPoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The game currently being played.
///
/// `tiebreak_points_*` only carry meaning while `is_tiebreak` is set;
/// `points_*` only while it is not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
pub struct GameScore {
    pub points_a: PadelPoint,
    pub points_b: PadelPoint,
    pub is_tiebreak: bool,
    pub tiebreak_points_a: u32,
    pub tiebreak_points_b: u32,
}

impl GameScore {
    pub fn new(is_tiebreak: bool) -> Self {
        Self { is_tiebreak, ..Self::default() }
    }

    pub fn points(&self, team: Team) -> PadelPoint {
        match team {
            Team::A => self.points_a,
            Team::B => self.points_b,
        }
    }

    pub fn points_mut(&mut self, team: Team) -> &mut PadelPoint {
        match team {
            Team::A => &mut self.points_a,
            Team::B => &mut self.points_b,
        }
    }

    pub fn tiebreak_points(&self, team: Team) -> u32 {
        match team {
            Team::A => self.tiebreak_points_a,
            Team::B => self.tiebreak_points_b,
        }
    }

    pub fn tiebreak_points_mut(&mut self, team: Team) -> &mut u32 {
        match team {
            Team::A => &mut self.tiebreak_points_a,
            Team::B => &mut self.tiebreak_points_b,
        }
    }

    /// Points already played in this tiebreak.
    pub fn tiebreak_points_played(&self) -> u32 {
        self.tiebreak_points_a + self.tiebreak_points_b
    }
}

/// Games of one set. Frozen once `winner` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
pub struct SetScore {
    pub games_a: u32,
    pub games_b: u32,
    /// Set once the set entered its tiebreak game.
    pub tiebreak: bool,
    pub winner: Option<Team>,
}

impl SetScore {
    pub fn games(&self, team: Team) -> u32 {
        match team {
            Team::A => self.games_a,
            Team::B => self.games_b,
        }
    }

    pub fn games_mut(&mut self, team: Team) -> &mut u32 {
        match team {
            Team::A => &mut self.games_a,
            Team::B => &mut self.games_b,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.winner.is_some()
    }
}

fn default_serving_player() -> u8 {
    1
}

/// Whole-match score state.
///
/// Invariants kept by the engine: `sets` is never empty, `current_set`
/// indexes the last set, and that set has no winner unless the match
/// itself is decided.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MatchScore {
    pub sets: Vec<SetScore>,
    pub current_set: usize,
    pub current_game: GameScore,
    pub serving_team: Team,
    /// Which partner of team A serves when A is serving (1 or 2).
    #[serde(default = "default_serving_player")]
    pub serving_player_a: u8,
    /// Which partner of team B serves when B is serving (1 or 2).
    #[serde(default = "default_serving_player")]
    pub serving_player_b: u8,
    pub winner: Option<Team>,
}

impl Default for MatchScore {
    fn default() -> Self {
        Self::new(Team::A)
    }
}

impl MatchScore {
    /// One empty set, game at 0-0, first player of each side lined up to serve.
    pub fn new(serving_team: Team) -> Self {
        Self {
            sets: vec![create_initial_set_score()],
            current_set: 0,
            current_game: create_initial_game_score(false),
            serving_team,
            serving_player_a: 1,
            serving_player_b: 1,
            winner: None,
        }
    }

    pub fn current_set(&self) -> &SetScore {
        &self.sets[self.current_set]
    }

    pub fn current_set_mut(&mut self) -> &mut SetScore {
        &mut self.sets[self.current_set]
    }

    pub fn sets_won(&self, team: Team) -> u32 {
        self.sets.iter().filter(|set| set.winner == Some(team)).count() as u32
    }

    pub fn serving_player(&self, team: Team) -> u8 {
        match team {
            Team::A => self.serving_player_a,
            Team::B => self.serving_player_b,
        }
    }

    pub fn serving_player_mut(&mut self, team: Team) -> &mut u8 {
        match team {
            Team::A => &mut self.serving_player_a,
            Team::B => &mut self.serving_player_b,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.winner.is_some()
    }
}

/// Zeroed game, optionally already in tiebreak mode.
pub fn create_initial_game_score(is_tiebreak: bool) -> GameScore {
    GameScore::new(is_tiebreak)
}

/// Zeroed set with no winner.
pub fn create_initial_set_score() -> SetScore {
    SetScore::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_ladder_stops_at_forty() {
        assert_eq!(PadelPoint::Love.next(), PadelPoint::Fifteen);
        assert_eq!(PadelPoint::Thirty.next(), PadelPoint::Forty);
        assert_eq!(PadelPoint::Forty.next(), PadelPoint::Forty);
        assert_eq!(PadelPoint::Advantage.next(), PadelPoint::Advantage);
    }

    #[test]
    fn test_initial_values_are_zeroed() {
        let game = create_initial_game_score(true);
        assert!(game.is_tiebreak);
        assert_eq!(game.tiebreak_points_played(), 0);
        assert_eq!(game.points(Team::A), PadelPoint::Love);

        let set = create_initial_set_score();
        assert_eq!((set.games_a, set.games_b), (0, 0));
        assert!(!set.tiebreak);
        assert!(set.winner.is_none());

        let score = MatchScore::new(Team::B);
        assert_eq!(score.sets.len(), 1);
        assert_eq!(score.current_set, 0);
        assert_eq!(score.serving_team, Team::B);
        assert_eq!((score.serving_player_a, score.serving_player_b), (1, 1));
        assert!(!score.current_game.is_tiebreak);
    }

    #[test]
    fn test_point_labels_on_the_wire() {
        let game = GameScore { points_a: PadelPoint::Advantage, points_b: PadelPoint::Forty, ..GameScore::default() };
        let json = serde_json::to_value(&game).unwrap();
        assert_eq!(json["points_a"], "AD");
        assert_eq!(json["points_b"], "40");
    }

    #[test]
    fn test_missing_serving_players_default_to_first() {
        let json = r#"{
            "sets": [{"games_a": 0, "games_b": 0, "tiebreak": false, "winner": null}],
            "current_set": 0,
            "current_game": {"points_a": "0", "points_b": "0", "is_tiebreak": false,
                             "tiebreak_points_a": 0, "tiebreak_points_b": 0},
            "serving_team": "b",
            "winner": null
        }"#;
        let score: MatchScore = serde_json::from_str(json).unwrap();
        assert_eq!(score.serving_player_a, 1);
        assert_eq!(score.serving_player_b, 1);
        assert_eq!(score.serving_team, Team::B);
    }
}
