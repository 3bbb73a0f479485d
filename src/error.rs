//! Custom error types for growth-tracker
//!
//! User-friendly error messages for all failure scenarios.

use thiserror::Error;

/// Main error type for the growth-tracker application
#[derive(Error, Debug)]
pub enum TrackerError {
    /// Goal text was empty or whitespace only
    #[error("Goal text cannot be empty.\n\n  → Example: growth add \"Learn Rust\"")]
    EmptyGoal,

    /// Goal index (zero-based) outside the current list
    #[error("Goal #{} does not exist.\n\n  → Run 'growth list' to see available goals.", .0 + 1)]
    GoalNotFound(usize),

    /// Step index (zero-based) outside the progress vector
    #[error("Step {} is out of range.\n\n  → Steps go from 1 to 5.", .0 + 1)]
    StepOutOfRange(usize),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("File operation failed: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("Failed to encode goals: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML serialization/deserialization error
    #[error("Configuration file is invalid: {0}")]
    Toml(String),

    /// Terminal/TUI error
    #[error("Terminal error: {0}\n\n  → Try resizing your terminal or restarting it.")]
    Terminal(String),

    /// Invalid input from user
    #[error("{0}")]
    InvalidInput(String),
}

impl From<toml::de::Error> for TrackerError {
    fn from(err: toml::de::Error) -> Self {
        TrackerError::Toml(err.to_string())
    }
}

impl From<toml::ser::Error> for TrackerError {
    fn from(err: toml::ser::Error) -> Self {
        TrackerError::Toml(err.to_string())
    }
}

/// Result type alias using TrackerError
pub type Result<T> = std::result::Result<T, TrackerError>;
