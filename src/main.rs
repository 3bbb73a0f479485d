//! growth-tracker - personal goal tracker
//!
//! A terminal application for tracking goals in five progress steps.
//! Run without arguments to launch the TUI, or use subcommands for CLI mode.
//!
//! Available as the `growth` command.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use growth_tracker::cli::commands::{Cli, Commands};
use growth_tracker::cli::{config, goals};
use growth_tracker::core::config::Config;
use growth_tracker::core::storage::JsonFileStorage;
use growth_tracker::core::tracker::Tracker;
use growth_tracker::error::Result;
use growth_tracker::tui::App;

#[tokio::main]
async fn main() {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        // Config commands don't touch the goal file
        Some(Commands::Config(args)) => config::handle_config(args.command),

        // No subcommand - launch TUI mode
        None => run_tui(cli.file).await,

        Some(command) => {
            let (_, mut tracker) = open_tracker(cli.file)?;
            goals::handle_goals(command, &mut tracker)
        }
    }
}

/// Run the TUI application
async fn run_tui(file: Option<PathBuf>) -> Result<()> {
    let (config, tracker) = open_tracker(file)?;

    let mut app = App::new(tracker).with_tick_rate(Duration::from_millis(config.tick_rate_ms));
    app.run().await
}

/// Resolve the goal file and load it
///
/// With an explicit `--file`, an unreadable config file falls back to defaults.
fn open_tracker(file: Option<PathBuf>) -> Result<(Config, Tracker<JsonFileStorage>)> {
    let config = match &file {
        Some(_) => Config::load().unwrap_or_else(|e| {
            debug!(error = %e, "Ignoring config file");
            Config::default()
        }),
        None => Config::load()?,
    };

    let path = config.resolve_storage_file(file);
    let tracker = Tracker::open(JsonFileStorage::new(path))?;
    Ok((config, tracker))
}
