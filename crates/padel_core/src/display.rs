//! Human-facing labels for the current score.

use crate::models::{GameScore, Match, MatchScore, Team};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Game score as shown on the scoreboard, one label per side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct GameScoreDisplay {
    pub a: String,
    pub b: String,
}

/// Who is serving right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ServingDisplay {
    pub team: Team,
    /// Serving partner within `team`: 1 or 2.
    pub player: u8,
}

/// Tiebreak games show raw point counts, regular games show 0/15/30/40/AD.
pub fn get_game_score_display(game: &GameScore) -> GameScoreDisplay {
    if game.is_tiebreak {
        GameScoreDisplay {
            a: game.tiebreak_points_a.to_string(),
            b: game.tiebreak_points_b.to_string(),
        }
    } else {
        GameScoreDisplay { a: game.points_a.to_string(), b: game.points_b.to_string() }
    }
}

pub fn serving_display(score: &MatchScore) -> ServingDisplay {
    ServingDisplay { team: score.serving_team, player: score.serving_player(score.serving_team) }
}

/// Finished sets as `"6-4  3-6"`.
pub fn match_summary(m: &Match) -> String {
    m.score
        .sets
        .iter()
        .filter(|set| set.is_finished())
        .map(|set| format!("{}-{}", set.games_a, set.games_b))
        .collect::<Vec<_>>()
        .join("  ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PadelPoint, SetScore};
    use insta::assert_json_snapshot;

    #[test]
    fn test_regular_game_labels() {
        let game = GameScore { points_a: PadelPoint::Fifteen, points_b: PadelPoint::Fifteen, ..GameScore::default() };
        assert_eq!(get_game_score_display(&game), GameScoreDisplay { a: "15".into(), b: "15".into() });

        let game = GameScore { points_a: PadelPoint::Advantage, points_b: PadelPoint::Forty, ..GameScore::default() };
        assert_json_snapshot!(get_game_score_display(&game), @r###"
        {
          "a": "AD",
          "b": "40"
        }
        "###);
    }

    #[test]
    fn test_tiebreak_shows_counts() {
        let game = GameScore {
            // Stale regular labels are ignored in tiebreak mode
            points_a: PadelPoint::Thirty,
            is_tiebreak: true,
            tiebreak_points_a: 11,
            tiebreak_points_b: 9,
            ..GameScore::default()
        };
        assert_eq!(get_game_score_display(&game), GameScoreDisplay { a: "11".into(), b: "9".into() });
    }

    #[test]
    fn test_fresh_game_shows_zeroes() {
        let display = get_game_score_display(&GameScore::default());
        assert_eq!((display.a.as_str(), display.b.as_str()), ("0", "0"));
    }

    #[test]
    fn test_serving_display() {
        let mut score = MatchScore::new(Team::B);
        score.serving_player_b = 2;
        assert_json_snapshot!(serving_display(&score), @r###"
        {
          "team": "b",
          "player": 2
        }
        "###);
    }

    #[test]
    fn test_match_summary_lists_finished_sets() {
        let mut m = crate::engine::create_match(
            crate::models::TeamInfo::new("A", "1", "2"),
            crate::models::TeamInfo::new("B", "3", "4"),
            &Default::default(),
            Team::A,
        );
        assert_eq!(match_summary(&m), "");

        m.score.sets = vec![
            SetScore { games_a: 6, games_b: 4, tiebreak: false, winner: Some(Team::A) },
            SetScore { games_a: 6, games_b: 7, tiebreak: true, winner: Some(Team::B) },
            SetScore { games_a: 2, games_b: 1, tiebreak: false, winner: None },
        ];
        assert_eq!(match_summary(&m), "6-4  6-7");
    }
}
