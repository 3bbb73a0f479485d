//! CLI command definitions using clap
//!
//! Defines the command structure for the `growth` CLI tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// growth - personal goal tracker
///
/// Track goals and their progress in five steps (20% to 100%).
/// Run without arguments to launch the TUI mode.
#[derive(Parser, Debug)]
#[command(name = "growth", version, about, long_about = None)]
pub struct Cli {
    /// Goal file to use instead of the configured one
    #[arg(long, global = true, env = "GROWTH_TRACKER_FILE")]
    pub file: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show all goals and their progress
    List,

    /// Add a new goal
    Add {
        /// Goal text
        text: String,
    },

    /// Delete every goal with the given text
    Delete {
        /// Goal text to match
        text: String,
    },

    /// Toggle one progress step of a goal
    Toggle {
        /// Goal number as shown by 'growth list'
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        goal: u32,

        /// Step number, 1 (20%) to 5 (100%)
        #[arg(value_parser = clap::value_parser!(u8).range(1..=5))]
        step: u8,
    },

    /// Remove all goals
    Clear {
        /// Clear without confirmation
        #[arg(long, short)]
        force: bool,
    },

    /// Manage configuration
    Config(ConfigArgs),
}

// ─────────────────────────────────────────────────────────────────────────────
// Config Commands
// ─────────────────────────────────────────────────────────────────────────────

/// Configuration commands
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Set a configuration value
    Set {
        /// Configuration key
        key: ConfigKey,

        /// Configuration value
        value: String,
    },

    /// Get a configuration value
    Get {
        /// Configuration key
        key: ConfigKey,
    },

    /// Reset a configuration value to its default
    Remove {
        /// Configuration key
        key: ConfigKey,
    },

    /// Print the configuration file location
    Path,
}

/// Available configuration keys
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ConfigKey {
    /// Goal file location
    #[value(name = "storage-file")]
    StorageFile,

    /// TUI refresh interval in milliseconds
    #[value(name = "tick-rate")]
    TickRate,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_means_tui() {
        let cli = Cli::try_parse_from(["growth"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_parse_toggle() {
        let cli = Cli::try_parse_from(["growth", "toggle", "2", "5"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Toggle { goal: 2, step: 5 })
        ));
    }

    #[test]
    fn test_toggle_step_range() {
        assert!(Cli::try_parse_from(["growth", "toggle", "1", "0"]).is_err());
        assert!(Cli::try_parse_from(["growth", "toggle", "1", "6"]).is_err());
        assert!(Cli::try_parse_from(["growth", "toggle", "0", "1"]).is_err());
    }

    #[test]
    fn test_global_file_flag() {
        let cli = Cli::try_parse_from(["growth", "list", "--file", "goals.json"]).unwrap();
        assert_eq!(cli.file, Some(PathBuf::from("goals.json")));
    }
}
