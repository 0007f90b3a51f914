use crate::save::SaveError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatchError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Match not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Save(#[from] SaveError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, MatchError>;
