use crate::error::{MatchError, Result};
use crate::models::FormatPreset;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::{env, fs};

pub const CONFIG_PATH_ENV: &str = "PADEL_CONFIG_PATH";
pub const DATA_DIR_ENV: &str = "PADEL_DATA_DIR";

/// Where matches live and which format new matches default to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub data_dir: PathBuf,
    pub default_preset: FormatPreset,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self { data_dir: PathBuf::from("matches"), default_preset: FormatPreset::Standard }
    }
}

impl ServiceConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Defaults, then the JSON file named by `PADEL_CONFIG_PATH`, then
    /// `PADEL_DATA_DIR`.
    pub fn load() -> Result<Self> {
        Self::load_with(|key| env::var(key).ok())
    }

    pub fn load_with<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup(CONFIG_PATH_ENV) {
            let path = path.trim();
            if !path.is_empty() {
                let content = fs::read_to_string(path).map_err(|e| {
                    MatchError::Config(format!("Failed to read config from {CONFIG_PATH_ENV}='{path}': {e}"))
                })?;
                config = Self::from_json(&content).map_err(|e| {
                    MatchError::Config(format!("Failed to parse config from {CONFIG_PATH_ENV}='{path}': {e}"))
                })?;
            }
        }

        if let Some(dir) = lookup(DATA_DIR_ENV) {
            let dir = dir.trim();
            if !dir.is_empty() {
                config.data_dir = PathBuf::from(dir);
            }
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn lookup(vars: HashMap<&'static str, String>) -> impl Fn(&str) -> Option<String> {
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_env() {
        let config = ServiceConfig::load_with(|_| None).unwrap();
        assert_eq!(config, ServiceConfig::default());
    }

    #[test]
    fn test_file_then_data_dir_override() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("padel.json");
        fs::write(&path, r#"{"data_dir": "/srv/padel", "default_preset": "golden_point"}"#).unwrap();

        let vars = HashMap::from([(CONFIG_PATH_ENV, path.display().to_string())]);
        let config = ServiceConfig::load_with(lookup(vars)).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/srv/padel"));
        assert_eq!(config.default_preset, FormatPreset::GoldenPoint);

        let vars = HashMap::from([
            (CONFIG_PATH_ENV, path.display().to_string()),
            (DATA_DIR_ENV, "/tmp/elsewhere".to_string()),
        ]);
        let config = ServiceConfig::load_with(lookup(vars)).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/elsewhere"));
        assert_eq!(config.default_preset, FormatPreset::GoldenPoint);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = ServiceConfig::from_json(r#"{"default_preset": "single_set"}"#).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("matches"));
        assert_eq!(config.default_preset, FormatPreset::SingleSet);
    }

    #[test]
    fn test_bad_file_names_the_variable() {
        let vars = HashMap::from([(CONFIG_PATH_ENV, "/definitely/not/here.json".to_string())]);
        let err = ServiceConfig::load_with(lookup(vars)).unwrap_err();
        assert!(err.to_string().contains(CONFIG_PATH_ENV));
    }
}
