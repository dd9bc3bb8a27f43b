//! Configuration management for lootgraph CLI
//!
//! Command-line flags override the config file, which overrides built-in
//! defaults.

use anyhow::{Context, Result};
use lootgraph::{FailurePolicy, GameVersion, DEFAULT_CONCURRENCY};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Directory holding one subdirectory per game version
    pub data_root: Option<PathBuf>,
    pub default_version: Option<GameVersion>,
    pub concurrency: Option<usize>,
    pub policy: Option<FailurePolicy>,
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("lootgraph");

        Ok(config_dir.join("config.toml"))
    }

    /// Load configuration from file, or create default if it doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Config::default());
        }

        let contents = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        toml::from_str(&contents).context("Failed to parse config file")
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        // Create config directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory at {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(config_path, contents)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        Ok(())
    }

    /// Data root from the flag or config
    pub fn data_root(&self, flag: Option<PathBuf>) -> Result<PathBuf> {
        flag.or_else(|| self.data_root.clone()).context(
            "No data root given; pass --data-root or run `lootgraph configure --data-root DIR`",
        )
    }

    /// Game version from the argument or config
    pub fn version(&self, arg: Option<GameVersion>) -> Result<GameVersion> {
        arg.or(self.default_version).context(
            "No game version given; pass one or run `lootgraph configure --default-version X.Y.Z`",
        )
    }

    pub fn concurrency(&self, flag: Option<usize>) -> usize {
        flag.or(self.concurrency).unwrap_or(DEFAULT_CONCURRENCY)
    }

    pub fn policy(&self, flag: Option<FailurePolicy>) -> FailurePolicy {
        flag.or(self.policy).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_path_exists() {
        let result = Config::config_path();
        assert!(result.is_ok());
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/config.toml");
        let config = Config {
            data_root: Some(PathBuf::from("/srv/minecraft")),
            default_version: Some(GameVersion::new(1, 21, 4)),
            concurrency: Some(4),
            policy: Some(FailurePolicy::Abort),
        };
        config.save_to(&path).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("default_version = \"1.21.4\""));
        assert!(contents.contains("policy = \"abort\""));
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_flags_override_config() {
        let config = Config {
            data_root: Some(PathBuf::from("/srv/minecraft")),
            default_version: Some(GameVersion::new(1, 20, 1)),
            concurrency: Some(4),
            policy: None,
        };
        assert_eq!(
            config.data_root(Some(PathBuf::from("/tmp/data"))).unwrap(),
            PathBuf::from("/tmp/data")
        );
        assert_eq!(config.data_root(None).unwrap(), PathBuf::from("/srv/minecraft"));
        assert_eq!(config.version(None).unwrap(), GameVersion::new(1, 20, 1));
        assert_eq!(config.concurrency(Some(16)), 16);
        assert_eq!(config.concurrency(None), 4);
        assert_eq!(config.policy(None), FailurePolicy::Skip);
        assert_eq!(config.policy(Some(FailurePolicy::Abort)), FailurePolicy::Abort);
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.data_root(None).is_err());
        assert!(config.version(None).is_err());
        assert_eq!(config.concurrency(None), DEFAULT_CONCURRENCY);
    }
}
