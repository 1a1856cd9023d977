//! Configuration management for ORIN.
//!
//! Loads configuration from ${ORIN_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default config template with comments, embedded at compile time.
const DEFAULT_CONFIG_TEMPLATE: &str = include_str!("default_config.toml");

pub mod paths {
    //! Path resolution for ORIN configuration directories.
    //!
    //! ORIN_HOME resolution order:
    //! 1. ORIN_HOME environment variable (if set)
    //! 2. ~/.config/orin (default)

    use std::path::PathBuf;

    /// Returns the ORIN home directory.
    ///
    /// Checks ORIN_HOME env var first, falls back to ~/.config/orin
    pub fn orin_home() -> PathBuf {
        if let Ok(home) = std::env::var("ORIN_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .map(|h| h.join(".config").join("orin"))
            .expect("Could not determine home directory")
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        orin_home().join("config.toml")
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Simulated assistant thinking delay in seconds (0 disables)
    pub reply_delay_secs: u32,

    /// Maximum number of user ID suggestions returned by searches
    pub suggestion_limit: usize,
}

impl Config {
    const DEFAULT_REPLY_DELAY_SECS: u32 = 3;
    const DEFAULT_SUGGESTION_LIMIT: usize = 5;

    /// Loads configuration from the default config path.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Returns the simulated thinking delay.
    pub fn reply_delay(&self) -> Duration {
        Duration::from_secs(u64::from(self.reply_delay_secs))
    }

    /// Creates a default config file at the given path.
    /// Returns an error if the file already exists.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        Self::write_config(path, DEFAULT_CONFIG_TEMPLATE)
    }

    /// Writes config content to a file, creating parent directories as needed.
    /// Uses atomic write (temp file + rename) to prevent corruption.
    fn write_config(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let tmp_path = path.with_extension("toml.tmp");
        fs::write(&tmp_path, content)
            .with_context(|| format!("Failed to write config to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            reply_delay_secs: Self::DEFAULT_REPLY_DELAY_SECS,
            suggestion_limit: Self::DEFAULT_SUGGESTION_LIMIT,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    /// Config loading: missing file returns defaults.
    #[test]
    fn test_load_missing_file_returns_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("nonexistent.toml");

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.reply_delay_secs, 3);
        assert_eq!(config.suggestion_limit, 5);
    }

    /// Config loading: partial config merges with defaults.
    #[test]
    fn test_load_partial_config_merges_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        fs::write(&config_path, "reply_delay_secs = 0\n").unwrap();

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.reply_delay_secs, 0);
        assert_eq!(config.suggestion_limit, 5); // default preserved
    }

    /// Config loading: malformed file is an error, not a silent default.
    #[test]
    fn test_load_malformed_config_fails() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        fs::write(&config_path, "reply_delay_secs = \"soon\"\n").unwrap();

        assert!(Config::load_from(&config_path).is_err());
    }

    /// Config init: creates file with defaults, creates parent dirs.
    #[test]
    fn test_init_creates_config_with_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("subdir").join("config.toml");

        Config::init(&config_path).unwrap();

        assert!(config_path.exists());
        let contents = fs::read_to_string(&config_path).unwrap();
        assert!(contents.contains("reply_delay_secs"));
        assert!(contents.contains("suggestion_limit"));

        // The template must parse back to the built-in defaults.
        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.reply_delay_secs, 3);
        assert_eq!(config.suggestion_limit, 5);
    }

    /// Config init: fails if file exists (no silent overwrite).
    #[test]
    fn test_init_fails_if_exists() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        fs::write(&config_path, "").unwrap();

        let result = Config::init(&config_path);
        assert!(result.is_err());
    }

    /// Delay: zero disables the sleep entirely.
    #[test]
    fn test_reply_delay_zero_is_zero_duration() {
        let config = Config {
            reply_delay_secs: 0,
            ..Default::default()
        };
        assert!(config.reply_delay().is_zero());
    }

    #[test]
    fn test_reply_delay_converts_seconds() {
        let config = Config::default();
        assert_eq!(config.reply_delay(), Duration::from_secs(3));
    }
}
