//! Storage backends for matches.
//!
//! The scoring engine never touches these; callers load a match, run an
//! engine operation and write the result back.

use super::error::SaveError;
use super::format::{decompress_and_deserialize, serialize_and_compress, MatchSave};
use super::migration::migrate_save;
use crate::models::Match;

use std::collections::HashMap;
use std::fs::{remove_file, rename, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

const MATCH_FILE_EXTENSION: &str = "match";
const MAX_ID_LEN: usize = 64;

pub trait MatchStore: Send + Sync {
    /// Fails with [`SaveError::NotFound`] when no match has this id.
    fn load(&self, id: &str) -> Result<Match, SaveError>;

    fn save(&self, m: &Match) -> Result<(), SaveError>;

    fn exists(&self, id: &str) -> bool;

    fn delete(&self, id: &str) -> Result<(), SaveError>;

    /// Stored ids, sorted.
    fn list_ids(&self) -> Result<Vec<String>, SaveError>;
}

/// Ids double as file names, so only `[A-Za-z0-9_-]{1,64}` is accepted.
pub fn validate_match_id(id: &str) -> Result<(), SaveError> {
    let valid = !id.is_empty()
        && id.len() <= MAX_ID_LEN
        && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(SaveError::InvalidId { id: id.to_string() })
    }
}

/// One compressed file per match under `dir`.
#[derive(Debug, Clone)]
pub struct FileMatchStore {
    dir: PathBuf,
}

impl FileMatchStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{id}.{MATCH_FILE_EXTENSION}"))
    }

    fn save_to_path(path: &Path, save: &MatchSave) -> Result<(), SaveError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = serialize_and_compress(save)?;

        // Atomic save: write to temp file, then rename
        let temp_path = path.with_extension("tmp");

        {
            let mut file = File::create(&temp_path)?;
            file.write_all(&data)?;
            file.flush()?;
            file.sync_all()?;
        }

        rename(&temp_path, path)?;

        log::debug!("Saved {} bytes to {:?}", data.len(), path);
        Ok(())
    }

    fn load_from_path(path: &Path) -> Result<MatchSave, SaveError> {
        let mut file = File::open(path)?;
        let mut data = Vec::new();
        file.read_to_end(&mut data)?;

        let save = migrate_save(decompress_and_deserialize(&data)?)?;

        log::debug!("Loaded {} bytes from {:?}", data.len(), path);
        Ok(save)
    }
}

impl MatchStore for FileMatchStore {
    fn load(&self, id: &str) -> Result<Match, SaveError> {
        validate_match_id(id)?;

        let path = self.path_for(id);
        if !path.exists() {
            return Err(SaveError::NotFound { id: id.to_string() });
        }

        let save = Self::load_from_path(&path)?;
        if save.match_data.id != id {
            log::warn!("File {:?} holds match {}, expected {}", path, save.match_data.id, id);
            return Err(SaveError::Corrupted);
        }
        Ok(save.match_data)
    }

    fn save(&self, m: &Match) -> Result<(), SaveError> {
        validate_match_id(&m.id)?;
        Self::save_to_path(&self.path_for(&m.id), &MatchSave::new(m.clone()))?;
        log::info!("Match {} saved ({} points)", m.id, m.point_history.len());
        Ok(())
    }

    fn exists(&self, id: &str) -> bool {
        validate_match_id(id).is_ok() && self.path_for(id).exists()
    }

    fn delete(&self, id: &str) -> Result<(), SaveError> {
        validate_match_id(id)?;

        let path = self.path_for(id);
        if path.exists() {
            remove_file(&path)?;
            log::info!("Deleted match {}", id);
        }
        Ok(())
    }

    fn list_ids(&self) -> Result<Vec<String>, SaveError> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut ids = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(MATCH_FILE_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                ids.push(stem.to_string());
            }
        }
        ids.sort();
        Ok(ids)
    }
}

/// In-process store, mostly for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryMatchStore {
    matches: RwLock<HashMap<String, Match>>,
}

impl MemoryMatchStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MatchStore for MemoryMatchStore {
    fn load(&self, id: &str) -> Result<Match, SaveError> {
        validate_match_id(id)?;
        let matches = self.matches.read().unwrap_or_else(PoisonError::into_inner);
        matches.get(id).cloned().ok_or_else(|| SaveError::NotFound { id: id.to_string() })
    }

    fn save(&self, m: &Match) -> Result<(), SaveError> {
        validate_match_id(&m.id)?;
        MatchSave::new(m.clone()).validate()?;
        let mut matches = self.matches.write().unwrap_or_else(PoisonError::into_inner);
        matches.insert(m.id.clone(), m.clone());
        Ok(())
    }

    fn exists(&self, id: &str) -> bool {
        self.matches.read().unwrap_or_else(PoisonError::into_inner).contains_key(id)
    }

    fn delete(&self, id: &str) -> Result<(), SaveError> {
        validate_match_id(id)?;
        self.matches.write().unwrap_or_else(PoisonError::into_inner).remove(id);
        Ok(())
    }

    fn list_ids(&self) -> Result<Vec<String>, SaveError> {
        let mut ids: Vec<String> =
            self.matches.read().unwrap_or_else(PoisonError::into_inner).keys().cloned().collect();
        ids.sort();
        Ok(ids)
    }
}
