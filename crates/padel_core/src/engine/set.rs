//! Game → set progression.

use crate::models::{SetScore, Team};

/// Winner of `set` given its game counts, if any.
///
/// A side takes the set with `games_per_set` games and a two-game lead,
/// or by winning the tiebreak game played at `games_per_set` all.
pub fn set_winner(set: &SetScore, games_per_set: u32) -> Option<Team> {
    for team in Team::BOTH {
        let mine = set.games(team);
        let theirs = set.games(team.opponent());
        if mine >= games_per_set && mine >= theirs.saturating_add(2) {
            return Some(team);
        }
    }

    if set.tiebreak {
        for team in Team::BOTH {
            if set.games(team) == games_per_set.saturating_add(1)
                && set.games(team.opponent()) == games_per_set
            {
                return Some(team);
            }
        }
    }

    None
}

pub fn is_tiebreak_time(set: &SetScore, games_per_set: u32) -> bool {
    set.games_a == games_per_set && set.games_b == games_per_set
}
