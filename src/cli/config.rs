//! Configuration CLI command handlers

use std::path::PathBuf;

use crate::cli::commands::{ConfigCommand, ConfigKey};
use crate::core::config::Config;
use crate::core::storage::DEFAULT_STORAGE_FILE;
use crate::error::{Result, TrackerError};

/// Handle configuration commands
pub fn handle_config(command: ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Set { key, value } => handle_set(key, value),
        ConfigCommand::Get { key } => handle_get(key),
        ConfigCommand::Remove { key } => handle_remove(key),
        ConfigCommand::Path => {
            println!("{}", Config::config_path()?.display());
            Ok(())
        }
    }
}

/// Handle setting a configuration value
fn handle_set(key: ConfigKey, value: String) -> Result<()> {
    let mut config = Config::load()?;
    apply_value(&mut config, key, &value)?;
    config.save()?;

    match key {
        ConfigKey::StorageFile => println!("Goal file set to: {}", value.trim()),
        ConfigKey::TickRate => println!("Tick rate set to: {} ms", config.tick_rate_ms),
    }
    Ok(())
}

/// Handle getting a configuration value
fn handle_get(key: ConfigKey) -> Result<()> {
    let config = Config::load()?;
    match key {
        ConfigKey::StorageFile => match &config.storage_file {
            Some(path) => println!("Goal file: {}", path.display()),
            None => println!("Goal file: {} (default)", DEFAULT_STORAGE_FILE),
        },
        ConfigKey::TickRate => println!("Tick rate: {} ms", config.tick_rate_ms),
    }
    Ok(())
}

/// Handle removing a configuration value
fn handle_remove(key: ConfigKey) -> Result<()> {
    let mut config = Config::load()?;
    let defaults = Config::default();

    match key {
        ConfigKey::StorageFile => {
            config.set_storage_file(None);
            println!("Goal file reset to default: {}", DEFAULT_STORAGE_FILE);
        }
        ConfigKey::TickRate => {
            config.tick_rate_ms = defaults.tick_rate_ms;
            println!("Tick rate reset to default: {} ms", defaults.tick_rate_ms);
        }
    }

    config.save()
}

/// Parse `value` for `key` and store it in `config`
fn apply_value(config: &mut Config, key: ConfigKey, value: &str) -> Result<()> {
    match key {
        ConfigKey::StorageFile => {
            let value = value.trim();
            if value.is_empty() {
                return Err(TrackerError::InvalidInput(
                    "Goal file path cannot be empty".into(),
                ));
            }
            config.set_storage_file(Some(PathBuf::from(value)));
        }
        ConfigKey::TickRate => {
            let millis = value.trim().parse::<u64>().map_err(|_| {
                TrackerError::InvalidInput(format!(
                    "Invalid tick rate '{}'. Expected a number of milliseconds.",
                    value
                ))
            })?;
            config.set_tick_rate(millis)?;
        }
    }
    Ok(())
}
