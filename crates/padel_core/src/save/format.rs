use super::error::SaveError;
use super::SAVE_VERSION;
use crate::models::{Match, MatchStatus};
use serde::{Deserialize, Serialize};

use chrono::Utc;
use lz4_flex::{compress_prepend_size, decompress_size_prepended};
use rmp_serde::{from_slice, to_vec_named};
use sha2::{Digest, Sha256};

/// Envelope written to storage for one match.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct MatchSave {
    /// Save format version for migration
    pub version: u32,

    /// Save timestamp (unix milliseconds)
    pub saved_at: u64,

    pub match_data: Match,
}

impl MatchSave {
    pub fn new(match_data: Match) -> Self {
        Self { version: SAVE_VERSION, saved_at: current_timestamp(), match_data }
    }

    pub fn update_timestamp(&mut self) {
        self.saved_at = current_timestamp();
    }

    /// Structural checks on the score tree before it is written.
    pub fn validate(&self) -> Result<(), SaveError> {
        let m = &self.match_data;
        if m.score.sets.is_empty() || m.score.current_set >= m.score.sets.len() {
            return Err(SaveError::Corrupted);
        }
        let completed = m.status == MatchStatus::Completed;
        if completed != m.score.winner.is_some() {
            return Err(SaveError::Corrupted);
        }
        Ok(())
    }
}

/// Serialize and compress a match save
pub fn serialize_and_compress(save: &MatchSave) -> Result<Vec<u8>, SaveError> {
    save.validate()?;

    // 1. MessagePack with field names
    let msgpack = to_vec_named(save)?;

    // 2. LZ4, size prepended
    let compressed = compress_prepend_size(&msgpack);

    // 3. SHA256 checksum at the end
    let mut hasher = Sha256::new();
    hasher.update(&compressed);
    let checksum = hasher.finalize();

    let mut result = compressed;
    result.extend_from_slice(&checksum);

    Ok(result)
}

/// Decompress and deserialize a match save
pub fn decompress_and_deserialize(bytes: &[u8]) -> Result<MatchSave, SaveError> {
    // Header + checksum
    if bytes.len() < 4 + 32 {
        return Err(SaveError::Corrupted);
    }

    let (payload, checksum_bytes) = bytes.split_at(bytes.len() - 32);

    let mut hasher = Sha256::new();
    hasher.update(payload);
    let calculated_checksum = hasher.finalize();

    if &calculated_checksum[..] != checksum_bytes {
        return Err(SaveError::ChecksumMismatch);
    }

    let msgpack = decompress_size_prepended(payload).map_err(|_| SaveError::Decompression)?;
    let save: MatchSave = from_slice(&msgpack)?;

    if save.version > SAVE_VERSION {
        return Err(SaveError::VersionMismatch { found: save.version, expected: SAVE_VERSION });
    }

    Ok(save)
}

pub fn current_timestamp() -> u64 {
    Utc::now().timestamp_millis().max(0) as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{create_match, score_point};
    use crate::models::{Team, TeamInfo};

    fn sample_match() -> Match {
        let m = create_match(
            TeamInfo::new("Reds", "Juan", "Maria"),
            TeamInfo::new("Blues", "Pedro", "Ana"),
            &Default::default(),
            Team::A,
        );
        (0..9).fold(m, |m, i| score_point(&m, if i % 3 == 0 { Team::B } else { Team::A }))
    }

    #[test]
    fn test_serialize_deserialize_roundtrip() {
        let save = MatchSave::new(sample_match());

        let serialized = serialize_and_compress(&save).unwrap();
        let deserialized = decompress_and_deserialize(&serialized).unwrap();

        assert_eq!(deserialized.version, SAVE_VERSION);
        assert_eq!(deserialized.match_data, save.match_data);
    }

    #[test]
    fn test_checksum_validation() {
        let save = MatchSave::new(sample_match());
        let mut serialized = serialize_and_compress(&save).unwrap();

        if let Some(last) = serialized.last_mut() {
            *last = last.wrapping_add(1);
        }

        let result = decompress_and_deserialize(&serialized);
        assert!(matches!(result, Err(SaveError::ChecksumMismatch)));
    }

    #[test]
    fn test_truncated_data_is_corrupted() {
        assert!(matches!(decompress_and_deserialize(&[0u8; 12]), Err(SaveError::Corrupted)));
    }

    #[test]
    fn test_future_version_rejected() {
        let mut save = MatchSave::new(sample_match());
        save.version = SAVE_VERSION + 1;
        let serialized = serialize_and_compress(&save).unwrap();
        assert!(matches!(
            decompress_and_deserialize(&serialized),
            Err(SaveError::VersionMismatch { found, .. }) if found == SAVE_VERSION + 1
        ));
    }

    #[test]
    fn test_inconsistent_status_is_not_written() {
        let mut m = sample_match();
        m.status = MatchStatus::Completed;
        let result = serialize_and_compress(&MatchSave::new(m));
        assert!(matches!(result, Err(SaveError::Corrupted)));
    }
}
