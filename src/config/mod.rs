// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Examples
//!
//! ```no_run
//! use media_exif::config::{self, Config};
//!
//! // Load existing configuration
//! let mut config = config::load().unwrap_or_default();
//!
//! // Never shell out to exiftool
//! config.exif.use_exiftool = false;
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub use defaults::{DEFAULT_EXIFTOOL_PROGRAM, DEFAULT_LOG_LEVEL};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "MediaExif";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// One of [`defaults::LOG_LEVELS`], used when `RUST_LOG` is unset.
    pub log_level: Option<String>,
    pub exif: ExifConfig,
}

impl Config {
    /// Log level to use. Missing or unknown levels fall back to
    /// [`DEFAULT_LOG_LEVEL`].
    #[must_use]
    pub fn log_level(&self) -> &str {
        self.log_level
            .as_deref()
            .map(str::trim)
            .filter(|level| defaults::LOG_LEVELS.contains(level))
            .unwrap_or(DEFAULT_LOG_LEVEL)
    }
}

/// Parser selection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExifConfig {
    /// Prefer the external tool when it responds.
    pub use_exiftool: bool,
    /// Program name or path of the external tool.
    pub exiftool_program: PathBuf,
}

impl Default for ExifConfig {
    fn default() -> Self {
        Self {
            use_exiftool: defaults::DEFAULT_USE_EXIFTOOL,
            exiftool_program: PathBuf::from(DEFAULT_EXIFTOOL_PROGRAM),
        }
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content).unwrap_or_default())
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_settings() {
        let config = Config {
            exif: ExifConfig {
                use_exiftool: false,
                exiftool_program: PathBuf::from("/opt/exiftool/exiftool"),
            },
            log_level: Some("debug".to_string()),
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_returns_default_on_invalid_toml() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        let loaded = load_from_path(&config_path).expect("load should not error");
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn missing_keys_take_defaults() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "[exif]\nuse_exiftool = false\n").expect("failed to write toml");

        let loaded = load_from_path(&config_path).expect("load should not error");
        assert!(!loaded.exif.use_exiftool);
        assert_eq!(
            loaded.exif.exiftool_program,
            PathBuf::from(DEFAULT_EXIFTOOL_PROGRAM)
        );
        assert_eq!(loaded.log_level(), DEFAULT_LOG_LEVEL);
    }

    #[test]
    fn load_from_missing_path_is_an_io_error() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let result = load_from_path(&temp_dir.path().join("absent.toml"));
        assert!(matches!(result, Err(crate::error::Error::Io(_))));
    }

    #[test]
    fn log_level_accepts_known_levels_only() {
        let mut config = Config {
            log_level: Some("debug".to_string()),
            ..Config::default()
        };
        assert_eq!(config.log_level(), "debug");

        config.log_level = Some(" trace ".to_string());
        assert_eq!(config.log_level(), "trace");

        config.log_level = Some("verbose".to_string());
        assert_eq!(config.log_level(), DEFAULT_LOG_LEVEL);

        config.log_level = Some(String::new());
        assert_eq!(config.log_level(), DEFAULT_LOG_LEVEL);
    }

    #[test]
    fn default_config_prefers_exiftool() {
        let config = Config::default();
        assert!(config.exif.use_exiftool);
        assert_eq!(config.log_level, None);
        assert_eq!(config.log_level(), "info");
    }
}
