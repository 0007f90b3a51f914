//! Serve rotation.
//!
//! Between games and sets the serve always changes hands. Inside a
//! tiebreak the first server serves one point, then each side serves two
//! in a row: the serve changes after points 1, 3, 5, ...

use crate::models::MatchScore;

/// Hand the serve to the other side.
///
/// The side giving up the serve rotates its partner first, so next time
/// it serves the other player steps up.
pub fn switch_serve(score: &mut MatchScore) {
    let outgoing = score.serving_team;
    let player = score.serving_player_mut(outgoing);
    *player = if *player == 1 { 2 } else { 1 };
    score.serving_team = outgoing.opponent();
}

/// Whether the serve changes once `points_played` tiebreak points are done.
pub fn tiebreak_serve_changes(points_played: u32) -> bool {
    points_played % 2 == 1
}
