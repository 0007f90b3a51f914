//! Rules for a single game: regular (0/15/30/40/AD) and tiebreak.

use crate::models::{GameScore, PadelPoint, Team};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Continues,
    Won(Team),
}

impl GameOutcome {
    pub fn is_won(self) -> bool {
        matches!(self, GameOutcome::Won(_))
    }
}

/// Apply one point of a regular game.
///
/// With `golden_point` the advantage state is never entered: the point
/// played at 40-40 decides the game.
pub fn play_regular_point(game: &mut GameScore, scorer: Team, golden_point: bool) -> GameOutcome {
    let opponent = scorer.opponent();

    match (game.points(scorer), game.points(opponent)) {
        (PadelPoint::Forty, PadelPoint::Forty) if golden_point => GameOutcome::Won(scorer),
        (PadelPoint::Forty, PadelPoint::Forty) => {
            *game.points_mut(scorer) = PadelPoint::Advantage;
            GameOutcome::Continues
        }
        (PadelPoint::Advantage, _) => GameOutcome::Won(scorer),
        // Back to deuce
        (_, PadelPoint::Advantage) => {
            *game.points_mut(opponent) = PadelPoint::Forty;
            GameOutcome::Continues
        }
        (PadelPoint::Forty, _) => GameOutcome::Won(scorer),
        (current, _) => {
            *game.points_mut(scorer) = current.next();
            GameOutcome::Continues
        }
    }
}

/// Apply one point of a tiebreak played to `target` with a two-point margin.
pub fn play_tiebreak_point(game: &mut GameScore, scorer: Team, target: u32) -> GameOutcome {
    *game.tiebreak_points_mut(scorer) += 1;

    let mine = game.tiebreak_points(scorer);
    let theirs = game.tiebreak_points(scorer.opponent());

    if mine >= target && mine >= theirs.saturating_add(2) {
        GameOutcome::Won(scorer)
    } else {
        GameOutcome::Continues
    }
}
