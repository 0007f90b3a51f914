use super::error::SaveError;
use super::format::MatchSave;
use super::SAVE_VERSION;
use crate::models::{MatchScore, MatchStatus};

/// Migrate save data from older versions to current version
pub fn migrate_save(mut save: MatchSave) -> Result<MatchSave, SaveError> {
    let original_version = save.version;

    save = match save.version {
        0 => migrate_v0_to_v1(save)?,
        1 => save,
        _ => {
            return Err(SaveError::VersionMismatch { found: save.version, expected: SAVE_VERSION });
        }
    };

    save.version = SAVE_VERSION;

    if original_version != SAVE_VERSION {
        save.update_timestamp();
        log::info!(
            "Migrated match {} from version {} to {}",
            save.match_data.id,
            original_version,
            SAVE_VERSION
        );
    }

    Ok(save)
}

/// Version 0 predates serving-player tracking and could carry a status
/// that disagreed with the score.
fn migrate_v0_to_v1(mut save: MatchSave) -> Result<MatchSave, SaveError> {
    log::info!("Migrating match {} from version 0 to 1", save.match_data.id);

    let m = &mut save.match_data;
    backfill_serving_players(&mut m.score);
    for event in &mut m.point_history {
        backfill_serving_players(&mut event.score_snapshot);
    }

    if m.score.sets.is_empty() {
        return Err(SaveError::Corrupted);
    }

    let derived = if m.score.winner.is_some() { MatchStatus::Completed } else { MatchStatus::InProgress };
    if m.status != derived {
        log::warn!("Match {} status {:?} disagrees with score, using {:?}", m.id, m.status, derived);
        m.status = derived;
    }

    Ok(save)
}

fn backfill_serving_players(score: &mut MatchScore) {
    for player in [&mut score.serving_player_a, &mut score.serving_player_b] {
        if !matches!(*player, 1 | 2) {
            *player = 1;
        }
    }
}
