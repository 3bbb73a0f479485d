//! Terminal User Interface module
//!
//! This module contains the ratatui-based TUI implementation: a goal input
//! line above a progress grid, driven by the tracker's command interface.

pub mod app;
pub mod event;
pub mod theme;
pub mod ui;

pub use app::App;
