//! Settings persistence
//!
//! Saves and loads [`Settings`] to/from a JSON file so preferences survive
//! between runs.
//!
//! # File Location
//!
//! Settings live in `settings.json` inside the per-user configuration
//! directory, falling back to `settings.json` in the working directory when
//! the platform has none.
//!
//! # Error Handling
//!
//! - Load failures fall back to default settings with a warning
//! - Save failures are returned to the caller

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use ring_engine::constants::{MAX_PLAYERS, MIN_PLAYERS};
use serde::{Deserialize, Serialize};
use shared::NAME_LEN;
use tracing::{info, warn};

use crate::core::error::{CoreError, CoreResult};

/// Settings filename
const SETTINGS_FILENAME: &str = "settings.json";

/// User preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Players in a new local match
    pub num_players: u32,
    /// Name announced when joining a hosted match
    pub player_name: String,
    /// `tracing` filter used when `RUST_LOG` is not set
    pub log_filter: String,
    /// Port a host listens on
    pub port: u16,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            num_players: 2,
            player_name: "Player".to_string(),
            log_filter: "info".to_string(),
            port: 1234,
        }
    }
}

impl Settings {
    /// Check values a match cannot be started with
    pub fn validate(&self) -> CoreResult<()> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.num_players) {
            return Err(CoreError::InvalidSettings {
                message: format!(
                    "num_players is {}, must be {}-{}",
                    self.num_players, MIN_PLAYERS, MAX_PLAYERS
                ),
            });
        }
        if self.player_name.len() > NAME_LEN {
            return Err(CoreError::InvalidSettings {
                message: format!("player_name is longer than {} bytes", NAME_LEN),
            });
        }
        Ok(())
    }
}

/// Resolve the default settings file path
///
/// Returns `settings.json` in the user's configuration directory, or in the
/// working directory if no configuration directory can be found.
pub fn settings_path() -> PathBuf {
    if let Some(proj_dirs) = ProjectDirs::from("org", "ringchess", "RingChess") {
        proj_dirs.config_dir().join(SETTINGS_FILENAME)
    } else {
        PathBuf::from(SETTINGS_FILENAME)
    }
}

/// Load settings from `path`
///
/// A missing, unreadable or invalid file yields the defaults.
pub fn load_settings(path: &Path) -> Settings {
    if !path.exists() {
        info!("[SETTINGS] No settings file found at {:?}. Using defaults.", path);
        return Settings::default();
    }

    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            warn!("[SETTINGS] Failed to read settings file at {:?}: {}. Using defaults.", path, e);
            return Settings::default();
        }
    };

    let settings = match serde_json::from_str::<Settings>(&contents) {
        Ok(settings) => settings,
        Err(e) => {
            warn!("[SETTINGS] Failed to parse settings file at {:?}: {}. Using defaults.", path, e);
            return Settings::default();
        }
    };

    if let Err(e) = settings.validate() {
        warn!("[SETTINGS] {} in {:?}. Using defaults.", e, path);
        return Settings::default();
    }

    info!("[SETTINGS] Loaded settings from {:?}", path);
    settings
}

/// Save settings to `path`, creating its directory if needed
pub fn save_settings(settings: &Settings, path: &Path) -> CoreResult<()> {
    settings.validate()?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json)?;
    info!("[SETTINGS] Saved settings to {:?}", path);
    Ok(())
}
