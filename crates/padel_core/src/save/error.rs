use thiserror::Error;

#[derive(Error, Debug)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] rmp_serde::encode::Error),

    #[error("Deserialization error: {0}")]
    Deserialization(#[from] rmp_serde::decode::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Decompression error")]
    Decompression,

    #[error("Corrupted data")]
    Corrupted,

    #[error("Version mismatch: found {found}, expected {expected}")]
    VersionMismatch { found: u32, expected: u32 },

    #[error("Checksum mismatch")]
    ChecksumMismatch,

    #[error("Match not found: {id}")]
    NotFound { id: String },

    #[error("Invalid match id: {id:?}")]
    InvalidId { id: String },
}

impl SaveError {
    pub fn is_recoverable(&self) -> bool {
        match self {
            SaveError::Io(_) => true,
            SaveError::NotFound { .. } => true,
            SaveError::VersionMismatch { .. } => true, // Can try migration
            SaveError::InvalidId { .. } => false,
            SaveError::Corrupted => false,
            SaveError::ChecksumMismatch => false,
            _ => false,
        }
    }
}
