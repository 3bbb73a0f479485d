//! CLI module for growth-tracker
//!
//! This module contains all CLI command definitions and handlers using clap.

pub mod commands;
pub mod config;
pub mod goals;

pub use commands::{Cli, Commands};
