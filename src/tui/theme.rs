//! TUI theme and styles

use ratatui::style::{Color, Modifier, Style};

/// Application color theme
pub struct Theme;

impl Theme {
    /// Primary accent color
    pub const PRIMARY: Color = Color::Cyan;

    /// Secondary accent color
    pub const SECONDARY: Color = Color::Yellow;

    /// Success color
    pub const SUCCESS: Color = Color::Green;

    /// Error color
    pub const ERROR: Color = Color::Red;

    /// Muted text color
    pub const MUTED: Color = Color::DarkGray;

    /// Header style
    pub fn header() -> Style {
        Style::default().fg(Self::PRIMARY)
    }

    /// Status bar style
    pub fn status_bar() -> Style {
        Style::default().bg(Color::DarkGray)
    }

    /// Selected row style
    pub fn selected() -> Style {
        Style::default().bg(Self::PRIMARY).fg(Color::Black)
    }

    /// Cell under the step cursor
    pub fn cursor_cell() -> Style {
        Style::default()
            .bg(Self::SECONDARY)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD)
    }

    /// Checked progress step
    pub fn step_done() -> Style {
        Style::default().fg(Self::SUCCESS)
    }

    /// Unchecked progress step
    pub fn step_pending() -> Style {
        Style::default().fg(Self::MUTED)
    }

    /// Goal whose steps are all checked
    pub fn goal_complete() -> Style {
        Style::default()
            .fg(Self::SUCCESS)
            .add_modifier(Modifier::BOLD)
    }

    /// Border of the focused panel
    pub fn focused_border() -> Style {
        Style::default().fg(Self::SECONDARY)
    }

    /// Unsaved-changes marker
    pub fn unsaved() -> Style {
        Style::default().fg(Self::SECONDARY)
    }

    /// Error popup border
    pub fn error() -> Style {
        Style::default().fg(Self::ERROR)
    }

    /// Normal text style
    pub fn normal() -> Style {
        Style::default()
    }

    /// Muted text style
    pub fn muted() -> Style {
        Style::default().fg(Self::MUTED)
    }
}
