//! # Point Scoring Engine
//!
//! Pure transitions over [`Match`](crate::models::Match) values. Every
//! operation takes the current match by reference and returns the next
//! one; nothing here performs I/O or holds state between calls.
//!
//! ```text
//! score_point(m, team)
//!   ├─ push PointEvent { score_snapshot: m.score }   (history)
//!   ├─ game::play_*_point                            (0/15/30/40/AD or tiebreak count)
//!   ├─ set::set_winner / set::is_tiebreak_time       (game → set)
//!   ├─ sets_won >= sets_to_win                       (set → match)
//!   └─ serve::switch_serve                           (rotation)
//! ```

pub mod create;
pub mod game;
pub mod history;
pub mod scoring;
pub mod serve;
pub mod set;


pub use create::{create_match, new_match_id};
pub use game::GameOutcome;
pub use history::undo_last_point;
pub use scoring::{score_point, score_point_at};
