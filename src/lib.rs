//! growth-tracker - personal goal tracking with five-step progress
//!
//! This library provides both CLI and TUI interfaces over a small goal
//! list persisted as JSON. All changes go through the [`Tracker`](crate::core::Tracker)
//! command interface, so the list can be driven and tested without a UI.

pub mod cli;
pub mod core;
pub mod error;
pub mod tui;

pub use error::{Result, TrackerError};
