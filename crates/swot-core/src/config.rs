//! Global configuration.
//!
//! `config.toml` lives in the swot config directory and is entirely
//! optional; every field has a default, and a missing file is simply the
//! default configuration. The config directory resolves from
//! `SWOT_CONFIG_DIR`, then `XDG_CONFIG_HOME/swot`, then the platform
//! config directory.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Filesystem locations.
    pub paths: PathsConfig,
    /// Corpus build settings.
    pub build: BuildConfig,
}

/// Configured filesystem locations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Default corpus root used when the CLI is run without `--root`.
    pub corpus_root: Option<PathBuf>,
    /// Override for the persisted-index data directory.
    pub data_dir: Option<PathBuf>,
}

/// Settings applied during corpus builds.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Descend into hidden files and directories while discovering.
    pub include_hidden: bool,
}

impl Config {
    /// Load the configuration, falling back to defaults when no file
    /// exists.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)?;
        toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("invalid config at {}: {e}", path.display())))
    }

    /// Resolve the path of `config.toml`.
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    fn config_dir() -> Result<PathBuf> {
        if let Ok(dir) = std::env::var("SWOT_CONFIG_DIR") {
            let trimmed = dir.trim();
            if !trimmed.is_empty() {
                return Ok(PathBuf::from(trimmed));
            }
        }

        if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
            let trimmed = xdg.trim();
            if !trimmed.is_empty() {
                return Ok(PathBuf::from(trimmed).join("swot"));
            }
        }

        directories::ProjectDirs::from("dev", "swot", "swot")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .ok_or_else(|| Error::Config("failed to determine config directory".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = Config::default();
        assert!(config.paths.corpus_root.is_none());
        assert!(!config.build.include_hidden);
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let config: Config = toml::from_str("[build]\ninclude_hidden = true\n")
            .expect("should parse");
        assert!(config.build.include_hidden);
        assert!(config.paths.data_dir.is_none());
    }

    #[test]
    fn round_trips_through_toml() {
        let mut config = Config::default();
        config.paths.corpus_root = Some(PathBuf::from("/notes"));
        config.build.include_hidden = true;

        let toml = toml::to_string_pretty(&config).expect("should serialize");
        let back: Config = toml::from_str(&toml).expect("should parse");
        assert_eq!(back.paths.corpus_root, Some(PathBuf::from("/notes")));
        assert!(back.build.include_hidden);
    }
}
