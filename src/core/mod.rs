//! Core functionality for growth-tracker
//!
//! This module contains the shared business logic:
//! - Goal model and goal list
//! - Durable storage
//! - The tracker session and its command interface
//! - Application configuration

pub mod config;
pub mod goal;
pub mod storage;
pub mod store;
pub mod tracker;

pub use config::Config;
pub use goal::{Goal, STEP_COUNT, STEP_LABELS};
pub use storage::{GoalStorage, JsonFileStorage};
pub use store::GoalStore;
pub use tracker::{Command, Outcome, Tracker};
