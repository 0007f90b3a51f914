//! The point transition.

use super::game::{self, GameOutcome};
use super::serve;
use super::set;
use crate::models::{
    create_initial_game_score, create_initial_set_score, Match, MatchScore, MatchSettings,
    MatchStatus, PointEvent, Team, SUPER_TIEBREAK_POINTS,
};
use chrono::{DateTime, Utc};

/// Apply one point won by `team`, timestamped now.
pub fn score_point(current: &Match, team: Team) -> Match {
    score_point_at(current, team, Utc::now())
}

/// Apply one point won by `team`, recording `timestamp` on the history entry.
///
/// A decided match is returned unchanged and nothing is recorded.
pub fn score_point_at(current: &Match, team: Team, timestamp: DateTime<Utc>) -> Match {
    if let Some(winner) = current.score.winner {
        log::debug!("Point for {} on match {} ignored: already won by {}", team, current.id, winner);
        return current.clone();
    }

    let mut next = current.clone();
    next.point_history.push(PointEvent { team, timestamp, score_snapshot: current.score.clone() });

    let settings = next.settings;
    let score = &mut next.score;
    let super_tiebreak = in_super_tiebreak(score, &settings);

    let outcome = if score.current_game.is_tiebreak {
        let target = if super_tiebreak { SUPER_TIEBREAK_POINTS } else { settings.tiebreak_points };
        game::play_tiebreak_point(&mut score.current_game, team, target)
    } else {
        game::play_regular_point(&mut score.current_game, team, settings.golden_point)
    };

    if outcome == GameOutcome::Continues {
        if score.current_game.is_tiebreak
            && serve::tiebreak_serve_changes(score.current_game.tiebreak_points_played())
        {
            serve::switch_serve(score);
        }
        return next;
    }

    *score.current_set_mut().games_mut(team) += 1;
    log::debug!(
        "Game to {} on match {}: set {} at {}-{}",
        team,
        next.id,
        score.current_set + 1,
        score.current_set().games_a,
        score.current_set().games_b
    );

    if super_tiebreak {
        score.current_set_mut().winner = Some(team);
        complete(&mut next, team);
        return next;
    }

    let Some(set_winner) = set::set_winner(score.current_set(), settings.games_per_set) else {
        if set::is_tiebreak_time(score.current_set(), settings.games_per_set) {
            score.current_set_mut().tiebreak = true;
            score.current_game = create_initial_game_score(true);
        } else {
            score.current_game = create_initial_game_score(false);
        }
        serve::switch_serve(score);
        return next;
    };

    score.current_set_mut().winner = Some(set_winner);
    log::info!(
        "Set {} to {} on match {} ({}-{})",
        score.current_set + 1,
        set_winner,
        next.id,
        score.current_set().games_a,
        score.current_set().games_b
    );

    if let Some(match_winner) =
        Team::BOTH.into_iter().find(|&side| score.sets_won(side) >= settings.sets_to_win)
    {
        complete(&mut next, match_winner);
        return next;
    }

    score.sets.push(create_initial_set_score());
    score.current_set += 1;
    let starts_with_super_tiebreak = settings.super_tiebreak && is_deciding_set(score, &settings);
    score.current_game = create_initial_game_score(starts_with_super_tiebreak);
    serve::switch_serve(score);

    if starts_with_super_tiebreak {
        log::debug!("Match {} goes to a super tiebreak", next.id);
    }
    next
}

/// Both sides are one set away from the match.
pub fn is_deciding_set(score: &MatchScore, settings: &MatchSettings) -> bool {
    let needed = settings.sets_to_win.saturating_sub(1);
    score.sets_won(Team::A) == needed && score.sets_won(Team::B) == needed
}

/// The current game is the single tiebreak standing in for the deciding set.
pub fn in_super_tiebreak(score: &MatchScore, settings: &MatchSettings) -> bool {
    let set = score.current_set();
    settings.super_tiebreak
        && score.current_game.is_tiebreak
        && set.games_a == 0
        && set.games_b == 0
        && is_deciding_set(score, settings)
}

fn complete(next: &mut Match, winner: Team) {
    next.score.winner = Some(winner);
    next.status = MatchStatus::Completed;
    log::info!(
        "Match {} won by {} after {} points",
        next.id,
        winner,
        next.point_history.len()
    );
}
