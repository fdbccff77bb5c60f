//! breathe configuration
//!
//! Config file: ~/.config/breathe/config.toml or /etc/breathe/config.toml
//!
//! ```toml
//! [session]
//! duration_secs = 4
//! cycles = 4
//! theme = "ocean"
//! focus = false
//!
//! [storage]
//! stats_file = "/home/me/.breathe.json"
//! ```

use anyhow::{Context, Result};
use breathe_shared::sequencer::{DEFAULT_CYCLES, DEFAULT_DURATION_SECS};
use breathe_shared::themes::DEFAULT_THEME;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment override for the config file location
pub const CONFIG_ENV: &str = "BREATHE_CONFIG";

/// Session defaults; CLI flags win over these
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub duration_secs: u32,
    pub cycles: u32,
    pub theme: String,
    pub focus: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            duration_secs: DEFAULT_DURATION_SECS,
            cycles: DEFAULT_CYCLES,
            theme: DEFAULT_THEME.to_string(),
            focus: false,
        }
    }
}

/// Where progress is kept
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub stats_file: Option<PathBuf>,
}

/// Main breathe configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreatheConfig {
    pub session: SessionConfig,
    pub storage: StorageConfig,
}

impl BreatheConfig {
    /// Get default user config path: ~/.config/breathe/config.toml
    pub fn user_config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }
        dirs::config_dir().map(|dir| dir.join("breathe").join("config.toml"))
    }

    /// Get system config path: /etc/breathe/config.toml
    pub fn system_config_path() -> PathBuf {
        PathBuf::from("/etc/breathe/config.toml")
    }

    /// Load configuration
    ///
    /// Priority:
    /// 1. User config ($BREATHE_CONFIG or ~/.config/breathe/config.toml)
    /// 2. System config (/etc/breathe/config.toml)
    /// 3. Defaults
    pub fn load() -> Result<Self> {
        if let Some(user_path) = Self::user_config_path() {
            if user_path.exists() {
                return Self::load_from(&user_path);
            }
        }

        let system_path = Self::system_config_path();
        if system_path.exists() {
            return Self::load_from(&system_path);
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: BreatheConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = BreatheConfig::default();
        assert_eq!(config.session.duration_secs, 4);
        assert_eq!(config.session.cycles, 4);
        assert_eq!(config.session.theme, "calm");
        assert!(config.storage.stats_file.is_none());
    }

    #[test]
    fn test_partial_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[session]\ntheme = \"sunset\"\n").unwrap();

        let config = BreatheConfig::load_from(&path).unwrap();
        assert_eq!(config.session.theme, "sunset");
        assert_eq!(config.session.duration_secs, 4);
    }

    #[test]
    fn test_storage_section() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[storage]\nstats_file = \"/tmp/b.json\"\n").unwrap();

        let config = BreatheConfig::load_from(&path).unwrap();
        assert_eq!(config.storage.stats_file, Some(PathBuf::from("/tmp/b.json")));
    }

    #[test]
    fn test_invalid_file_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[session\nduration_secs = ").unwrap();
        assert!(BreatheConfig::load_from(&path).is_err());
    }
}
