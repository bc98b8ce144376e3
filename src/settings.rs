use crate::stats::roster::Roster;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings from {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write settings to {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialise settings: {0}")]
    Serialise(#[from] toml::ser::Error),
}

const APP_DIR: &str = "neptunes-hooks";

/// Directory holding the settings file and the log directory.
pub fn config_root() -> PathBuf {
    config_root_from(std::env::var("XDG_CONFIG_HOME").ok(), std::env::var("HOME").ok())
}

fn config_root_from(xdg_config_home: Option<String>, home: Option<String>) -> PathBuf {
    if let Some(config_dir) = xdg_config_home
        && !config_dir.trim().is_empty()
    {
        return PathBuf::from(config_dir).join(APP_DIR);
    }
    if let Some(home) = home
        && !home.trim().is_empty()
    {
        return PathBuf::from(home).join(".config").join(APP_DIR);
    }
    PathBuf::from(".")
}

/// Where settings live when `--settings` isn't given.
pub fn default_settings_path() -> PathBuf {
    config_root().join("settings.toml")
}

/// Everything the service persists between runs, read from `settings.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub neptunes_pride: GameSettings,
    pub webhooks: WebhookSettings,
    pub players: Roster,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub game_number: i64,
    pub api_code: String,
    /// Ticks per turn, as configured for the game.
    pub tick_rate: i64,
    /// Last tick a report was posted for.
    pub last_tick: i64,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self { game_number: 0, api_code: String::new(), tick_rate: 12, last_tick: 0 }
    }
}

impl GameSettings {
    pub fn turn(&self, tick: i64) -> i64 {
        tick / self.tick_rate.max(1)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookSettings {
    /// Incoming webhook URL; empty disables posting.
    pub microsoft_teams: String,
}

impl WebhookSettings {
    pub fn microsoft_teams_url(&self) -> Option<&str> {
        Some(self.microsoft_teams.trim()).filter(|url| !url.is_empty())
    }
}

impl Settings {
    /// Load settings, writing a default file first if none exists.
    pub fn load_or_init(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            Settings::default().save(path)?;
        }
        Settings::load(path)
    }

    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path)
            .map_err(|source| SettingsError::Read { path: path.to_owned(), source })?;
        Ok(toml::from_str(&content)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|source| SettingsError::Write { path: path.to_owned(), source })?;
        }
        std::fs::write(path, content)
            .map_err(|source| SettingsError::Write { path: path.to_owned(), source })
    }
}
