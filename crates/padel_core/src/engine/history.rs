//! Point-level undo.
//!
//! Each accepted point stores the score it replaced, so undo is a plain
//! restore: no game, set or serve logic has to run backwards.

use crate::models::{Match, MatchStatus};

/// Revert the most recent accepted point.
///
/// Returns the match unchanged when there is nothing to undo. Otherwise
/// the status always goes back to in-progress, since the reverted point
/// may have been the one that decided the match.
pub fn undo_last_point(current: &Match) -> Match {
    let mut next = current.clone();
    let Some(event) = next.point_history.pop() else {
        log::debug!("Undo on match {} ignored: no points recorded", current.id);
        return next;
    };

    next.score = event.score_snapshot;
    next.status = MatchStatus::InProgress;

    log::debug!(
        "Undid point for team {} on match {} ({} points remain)",
        event.team,
        next.id,
        next.point_history.len()
    );
    next
}
