//! Application configuration management
//!
//! Handles loading and saving application settings including:
//! - Goal file location
//! - TUI refresh rate

use std::fs;
use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::core::storage::DEFAULT_STORAGE_FILE;
use crate::error::{Result, TrackerError};

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Goal file location; relative paths resolve against the working directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_file: Option<PathBuf>,

    /// TUI tick interval in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
}

fn default_tick_rate() -> u64 {
    250
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_file: None,
            tick_rate_ms: default_tick_rate(),
        }
    }
}

impl Config {
    /// Load configuration from file, or create default if not exists
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let contents = fs::read_to_string(&config_path)?;
            Self::from_toml(&contents)
        } else {
            Ok(Config::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        // Ensure parent directory exists
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(&config_path, contents)?;

        Ok(())
    }

    /// Parse configuration from TOML text
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        if config.tick_rate_ms == 0 {
            return Err(TrackerError::Config(
                "tick_rate_ms must be greater than zero".into(),
            ));
        }
        Ok(config)
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Get the configuration directory
    pub fn config_dir() -> Result<PathBuf> {
        let project_dirs = ProjectDirs::from("com", "growth-tracker", "growth-tracker")
            .ok_or_else(|| TrackerError::Config("Could not determine config directory".into()))?;

        Ok(project_dirs.config_dir().to_path_buf())
    }

    /// Goal file to use, honouring an explicit override first
    pub fn resolve_storage_file(&self, override_path: Option<PathBuf>) -> PathBuf {
        override_path
            .or_else(|| self.storage_file.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STORAGE_FILE))
    }

    /// Set the goal file location
    pub fn set_storage_file(&mut self, path: Option<PathBuf>) {
        self.storage_file = path;
    }

    /// Set the TUI tick interval, rejecting zero
    pub fn set_tick_rate(&mut self, millis: u64) -> Result<()> {
        if millis == 0 {
            return Err(TrackerError::InvalidInput(
                "Tick rate must be greater than zero".into(),
            ));
        }
        self.tick_rate_ms = millis;
        Ok(())
    }
}
