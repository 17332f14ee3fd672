//! Viewer configuration
//!
//! Read from `<config dir>/scry-market/config.yaml`. Every field is
//! optional; a missing file means all defaults.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::constants::{CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_LOG_FILE, NICKNAME_PLACEHOLDER};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Nickname shown until the real one is known
    pub nickname_placeholder: String,
    /// Log file path, relative to the working directory unless absolute
    pub log_file: PathBuf,
    /// Seed file replayed on start-up
    pub seed_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            nickname_placeholder: String::from(NICKNAME_PLACEHOLDER),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            seed_file: None,
        }
    }
}

impl Config {
    /// Default location of the config file
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Load from `path`, falling back to defaults when the file is absent
    pub fn load_from(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = serde_yaml::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }

    pub fn load() -> Result<Config> {
        Self::load_from(&Self::default_path())
    }

    /// Apply command line arguments: the first positional one is a seed file
    pub fn with_args<I>(mut self, args: I) -> Config
    where
        I: IntoIterator<Item = String>,
    {
        if let Some(seed) = args.into_iter().next() {
            self.seed_file = Some(PathBuf::from(seed));
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&temp_dir.path().join("config.yaml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.nickname_placeholder, NICKNAME_PLACEHOLDER);
    }

    #[test]
    fn test_partial_config() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.yaml");
        std::fs::write(&path, "nickname_placeholder: \"Loading nickname...\"\nseed_file: demo.yaml\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.nickname_placeholder, "Loading nickname...");
        assert_eq!(config.seed_file, Some(PathBuf::from("demo.yaml")));
        assert_eq!(config.log_file, PathBuf::from(DEFAULT_LOG_FILE));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.yaml");
        std::fs::write(&path, "theme: dark\n").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_args_override_seed() {
        let config = Config::default().with_args(vec!["other.json".to_string()]);
        assert_eq!(config.seed_file, Some(PathBuf::from("other.json")));
        assert_eq!(Config::default().with_args(Vec::new()).seed_file, None);
    }
}
