// SPDX-License-Identifier: MPL-2.0
//! Component configuration, including loading and saving host-adjustable
//! settings to a `settings.toml` file.
//!
//! # Examples
//!
//! ```no_run
//! use iced_feed::config::{self, Config};
//!
//! // Load existing configuration
//! let mut config = config::load().unwrap_or_default();
//!
//! // Modify a setting
//! config.dwell_ms = Some(750);
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//! ```

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub mod defaults;

pub use defaults::*;

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "IcedFeed";

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    /// Dwell before a visible post counts as centered, in milliseconds.
    #[serde(default)]
    pub dwell_ms: Option<u64>,
    /// Width of resolved still frames, in pixels.
    #[serde(default)]
    pub still_width: Option<u32>,
    /// Decoded-image cache budget, in bytes.
    #[serde(default)]
    pub image_cache_bytes: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dwell_ms: Some(DEFAULT_DWELL_MS),
            still_width: Some(DEFAULT_STILL_WIDTH),
            image_cache_bytes: Some(DEFAULT_IMAGE_CACHE_BYTES),
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
    fn default_config_carries_documented_defaults() {
        let config = Config::default();
        assert_eq!(config.dwell_ms, Some(DEFAULT_DWELL_MS));
        assert_eq!(config.still_width, Some(DEFAULT_STILL_WIDTH));
        assert_eq!(config.image_cache_bytes, Some(DEFAULT_IMAGE_CACHE_BYTES));
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join("settings.toml");

        let config = Config {
            dwell_ms: Some(750),
            still_width: Some(640),
            image_cache_bytes: Some(16 * 1024 * 1024),
        };
        save_to_path(&config, &path).expect("save failed");

        let loaded = load_from_path(&path).expect("load failed");
        assert_eq!(loaded.dwell_ms, Some(750));
        assert_eq!(loaded.still_width, Some(640));
        assert_eq!(loaded.image_cache_bytes, Some(16 * 1024 * 1024));
    }

    #[test]
    fn load_from_missing_path_errors() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join("does_not_exist.toml");
        assert!(load_from_path(&path).is_err());
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join("settings.toml");
        fs::write(&path, "this is not toml [[[").expect("write failed");

        let loaded = load_from_path(&path).expect("load should not fail");
        assert_eq!(loaded.dwell_ms, Some(DEFAULT_DWELL_MS));
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join("nested").join("deeper").join("settings.toml");

        save_to_path(&Config::default(), &path).expect("save failed");
        assert!(path.exists());
    }
}
