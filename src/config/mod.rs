// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and saving
//! user preferences to a `settings.toml` file.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "GridLens";

pub const DEFAULT_AUTOPLAY_INTERVAL_MS: u64 = 750;
pub const DEFAULT_CELL_SIZE: f32 = 256.0;

/// Autoplay intervals below this are indistinguishable from a stuck key
/// and would starve the event loop; clamp on the way in.
pub const MIN_AUTOPLAY_INTERVAL_MS: u64 = 50;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Period between autoplay ticks, in milliseconds.
    #[serde(default)]
    pub autoplay_interval_ms: Option<u64>,
    /// Whether scrubbing and autoplay wrap around at the ends.
    #[serde(default)]
    pub loop_playback: Option<bool>,
    /// Edge length of a grid cell, in logical pixels.
    #[serde(default)]
    pub cell_size: Option<f32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            autoplay_interval_ms: Some(DEFAULT_AUTOPLAY_INTERVAL_MS),
            loop_playback: Some(true),
            cell_size: Some(DEFAULT_CELL_SIZE),
        }
    }
}

impl Config {
    /// Autoplay interval with defaults and the minimum clamp applied.
    #[must_use]
    pub fn autoplay_interval(&self) -> u64 {
        self.autoplay_interval_ms
            .unwrap_or(DEFAULT_AUTOPLAY_INTERVAL_MS)
            .max(MIN_AUTOPLAY_INTERVAL_MS)
    }

    /// Loop policy with the default applied.
    #[must_use]
    pub fn loops(&self) -> bool {
        self.loop_playback.unwrap_or(true)
    }

    /// Cell size with the default applied.
    #[must_use]
    pub fn cell_size(&self) -> f32 {
        self.cell_size.unwrap_or(DEFAULT_CELL_SIZE)
    }
}

fn get_default_config_path(dir_override: Option<&Path>) -> Option<PathBuf> {
    if let Some(dir) = dir_override {
        return Some(dir.join(CONFIG_FILE));
    }
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load(dir_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = get_default_config_path(dir_override) {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config, dir_override: Option<&Path>) -> Result<()> {
    if let Some(path) = get_default_config_path(dir_override) {
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
