//! Main TUI application state and logic

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::prelude::*;
use ratatui::Terminal;
use tracing::debug;

use crate::core::goal::STEP_COUNT;
use crate::core::storage::GoalStorage;
use crate::core::tracker::{Command, Outcome, Tracker};
use crate::error::{Result, TrackerError};
use crate::tui::event::{is_confirm_key, is_interrupt_key, is_quit_key, AppEvent, EventHandler};
use crate::tui::ui;

/// Longest goal text accepted by the input field
const MAX_GOAL_LEN: usize = 200;

/// Which panel receives key presses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// New-goal text input
    Input,
    /// Progress grid
    Goals,
}

/// Action waiting for a y/N answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirm {
    /// Remove every goal
    ClearAll,
    /// Quit with unsaved changes
    Quit,
}

impl Confirm {
    /// Prompt shown in the confirmation popup
    pub fn prompt(&self, goal_count: usize) -> String {
        match self {
            Confirm::ClearAll => format!("Delete all {} goals? [y/N]", goal_count),
            Confirm::Quit => "You have unsaved progress. Quit anyway? [y/N]".to_string(),
        }
    }
}

/// List selection state
#[derive(Debug, Default)]
pub struct ListState {
    /// Currently selected index
    pub selected: usize,
    /// Total items in the list
    pub total: usize,
}

impl ListState {
    pub fn new(total: usize) -> Self {
        Self { selected: 0, total }
    }

    pub fn next(&mut self) {
        if self.total > 0 {
            self.selected = (self.selected + 1) % self.total;
        }
    }

    pub fn previous(&mut self) {
        if self.total > 0 {
            self.selected = self.selected.checked_sub(1).unwrap_or(self.total - 1);
        }
    }

    /// Update the item count, keeping the selection in range
    pub fn set_total(&mut self, total: usize) {
        self.total = total;
        self.selected = self.selected.min(total.saturating_sub(1));
    }
}

/// Error popup for displaying important errors that require user acknowledgment
#[derive(Debug, Clone)]
pub struct ErrorPopup {
    /// Title of the error popup (e.g., "Save Failed")
    pub title: String,
    /// The full error message to display
    pub message: String,
}

/// Main TUI application
pub struct App<S: GoalStorage> {
    /// Whether the app is running
    pub running: bool,
    /// Goal tracking session
    pub tracker: Tracker<S>,
    /// Which panel has focus
    pub focus: Focus,
    /// Selected goal row
    pub goal_selection: ListState,
    /// Selected progress column
    pub step_cursor: usize,
    /// Text typed into the new-goal input
    pub input: String,
    /// Status message to display
    pub status_message: Option<String>,
    /// Whether to show the help overlay
    pub show_help: bool,
    /// Pending confirmation prompt
    pub confirm: Option<Confirm>,
    /// Error popup (blocks input until dismissed)
    pub error_popup: Option<ErrorPopup>,
    /// Tick counter for the input cursor blink
    pub tick_counter: u64,
    tick_rate: Duration,
}

impl<S: GoalStorage> App<S> {
    /// Create the app around an opened tracker
    pub fn new(tracker: Tracker<S>) -> Self {
        let total = tracker.store().len();
        let focus = if total == 0 { Focus::Input } else { Focus::Goals };

        Self {
            running: true,
            tracker,
            focus,
            goal_selection: ListState::new(total),
            step_cursor: 0,
            input: String::new(),
            status_message: None,
            show_help: false,
            confirm: None,
            error_popup: None,
            tick_counter: 0,
            tick_rate: Duration::from_millis(250),
        }
    }

    /// Set the event tick interval
    pub fn with_tick_rate(mut self, tick_rate: Duration) -> Self {
        self.tick_rate = tick_rate;
        self
    }

    /// Setup terminal for TUI
    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode().map_err(|e| TrackerError::Terminal(e.to_string()))?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).map_err(|e| TrackerError::Terminal(e.to_string()))?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend).map_err(|e| TrackerError::Terminal(e.to_string()))?;
        Ok(terminal)
    }

    /// Restore terminal to normal state
    fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        disable_raw_mode().map_err(|e| TrackerError::Terminal(e.to_string()))?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .map_err(|e| TrackerError::Terminal(e.to_string()))?;
        terminal
            .show_cursor()
            .map_err(|e| TrackerError::Terminal(e.to_string()))?;
        Ok(())
    }

    /// Run the TUI application
    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = Self::setup_terminal()?;
        let result = self.event_loop(&mut terminal).await;
        Self::restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        let mut events = EventHandler::new(self.tick_rate);

        while self.running {
            terminal
                .draw(|frame| ui::render(frame, self))
                .map_err(|e| TrackerError::Terminal(e.to_string()))?;

            match events.next().await {
                Some(AppEvent::Key(key)) => self.handle_key_event(key),
                Some(AppEvent::Resize(_, _)) => {
                    // Terminal resize is handled automatically by ratatui
                }
                Some(AppEvent::Tick) => {
                    self.tick_counter = self.tick_counter.wrapping_add(1);
                }
                None => break,
            }
        }

        Ok(())
    }

    /// Route a key press to the active overlay or panel
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        // If help is shown, any key dismisses it
        if self.show_help {
            self.show_help = false;
            return;
        }

        // If error popup is shown, only allow dismissal keys
        if self.error_popup.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char('q')) {
                self.error_popup = None;
            }
            return;
        }

        if let Some(confirm) = self.confirm.take() {
            self.handle_confirm_key(confirm, key);
            return;
        }

        if is_interrupt_key(&key) {
            self.request_quit();
            return;
        }

        match self.focus {
            Focus::Input => self.handle_input_key(key),
            Focus::Goals => self.handle_goals_key(key),
        }
    }

    fn handle_confirm_key(&mut self, confirm: Confirm, key: KeyEvent) {
        if !is_confirm_key(&key) {
            self.status_message = Some("Cancelled".to_string());
            return;
        }

        match confirm {
            Confirm::ClearAll => {
                if self.apply(Command::ClearAll).is_some() {
                    self.status_message = Some("Cleared all goals".to_string());
                    self.focus = Focus::Input;
                }
            }
            Confirm::Quit => self.running = false,
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Tab => {
                self.focus = Focus::Goals;
            }
            KeyCode::Enter => self.submit_goal(),
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                if self.input.chars().count() < MAX_GOAL_LEN {
                    self.input.push(c);
                }
            }
            _ => {}
        }
    }

    fn handle_goals_key(&mut self, key: KeyEvent) {
        if is_quit_key(&key) {
            self.request_quit();
            return;
        }

        match key.code {
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char('j') | KeyCode::Down => self.goal_selection.next(),
            KeyCode::Char('k') | KeyCode::Up => self.goal_selection.previous(),
            KeyCode::Char('h') | KeyCode::Left => {
                self.step_cursor = self.step_cursor.checked_sub(1).unwrap_or(STEP_COUNT - 1);
            }
            KeyCode::Char('l') | KeyCode::Right => {
                self.step_cursor = (self.step_cursor + 1) % STEP_COUNT;
            }
            KeyCode::Char(' ') | KeyCode::Enter => self.toggle_step(self.step_cursor),
            KeyCode::Char(c @ '1'..='5') => {
                let step = c as usize - '1' as usize;
                self.step_cursor = step;
                self.toggle_step(step);
            }
            KeyCode::Char('a') | KeyCode::Char('i') | KeyCode::Tab => {
                self.focus = Focus::Input;
            }
            KeyCode::Char('d') | KeyCode::Delete => self.delete_selected(),
            KeyCode::Char('C') => {
                if self.tracker.store().is_empty() {
                    self.status_message = Some("No goals to clear".to_string());
                } else {
                    self.confirm = Some(Confirm::ClearAll);
                }
            }
            KeyCode::Char('s') => {
                if self.apply(Command::SaveAll).is_some() {
                    self.status_message = Some("All progress saved!".to_string());
                }
            }
            _ => {}
        }
    }

    fn submit_goal(&mut self) {
        let text = std::mem::take(&mut self.input);
        match self.apply(Command::Add(text.clone())) {
            Some(Outcome::Unchanged) => {
                self.input = text;
                self.status_message = Some("Goal text cannot be empty".to_string());
            }
            Some(_) => {
                self.goal_selection.selected = 0;
                self.status_message = Some(format!("Added '{}' (press s to save)", text.trim()));
            }
            None => self.input = text,
        }
    }

    fn toggle_step(&mut self, step: usize) {
        if self.tracker.store().is_empty() {
            return;
        }
        let goal = self.goal_selection.selected;
        self.apply(Command::Toggle { goal, step });
    }

    fn delete_selected(&mut self) {
        let Some(text) = self
            .tracker
            .store()
            .get(self.goal_selection.selected)
            .map(|goal| goal.text.clone())
        else {
            return;
        };

        if self.apply(Command::Delete(text.clone())).is_some() {
            self.status_message = Some(format!("Deleted '{}'", text));
        }
    }

    /// Quit, asking first when there are unsaved changes
    pub fn request_quit(&mut self) {
        if self.tracker.is_dirty() {
            self.confirm = Some(Confirm::Quit);
        } else {
            self.running = false;
        }
    }

    /// Dispatch a command, turning failures into an error popup
    fn apply(&mut self, command: Command) -> Option<Outcome> {
        let title = match &command {
            Command::Add(_) => "Add Failed",
            Command::Delete(_) => "Delete Failed",
            Command::Toggle { .. } => "Update Failed",
            Command::ClearAll => "Clear Failed",
            Command::SaveAll => "Save Failed",
        };

        let result = self.tracker.dispatch(command);
        self.goal_selection.set_total(self.tracker.store().len());

        match result {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                debug!(error = %e, "{}", title);
                self.error_popup = Some(ErrorPopup {
                    title: title.to_string(),
                    message: e.to_string(),
                });
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::storage::{JsonFileStorage, MockGoalStorage};
    use crate::core::store::GoalStore;
    use tempfile::TempDir;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text<S: GoalStorage>(app: &mut App<S>, text: &str) {
        for c in text.chars() {
            app.handle_key_event(press(KeyCode::Char(c)));
        }
    }

    fn file_app(dir: &TempDir) -> App<JsonFileStorage> {
        let storage = JsonFileStorage::new(dir.path().join("goals.json"));
        App::new(Tracker::open(storage).unwrap())
    }

    #[test]
    fn test_empty_store_starts_in_input() {
        let dir = TempDir::new().unwrap();
        let app = file_app(&dir);
        assert_eq!(app.focus, Focus::Input);
        assert!(app.running);
    }

    #[test]
    fn test_add_goal_from_input() {
        let dir = TempDir::new().unwrap();
        let mut app = file_app(&dir);

        type_text(&mut app, "Learn X");
        app.handle_key_event(press(KeyCode::Enter));

        assert!(app.input.is_empty());
        assert_eq!(app.tracker.store().get(0).unwrap().text, "Learn X");
        assert!(app.tracker.is_dirty());
    }

    #[test]
    fn test_blank_input_is_rejected() {
        let dir = TempDir::new().unwrap();
        let mut app = file_app(&dir);

        type_text(&mut app, "   ");
        app.handle_key_event(press(KeyCode::Enter));

        assert!(app.tracker.store().is_empty());
        assert_eq!(app.input, "   ");
        assert_eq!(
            app.status_message.as_deref(),
            Some("Goal text cannot be empty")
        );
    }

    #[test]
    fn test_typing_q_does_not_quit() {
        let dir = TempDir::new().unwrap();
        let mut app = file_app(&dir);

        type_text(&mut app, "quit smoking");
        assert!(app.running);
        assert_eq!(app.input, "quit smoking");
    }

    #[test]
    fn test_toggle_and_save() {
        let dir = TempDir::new().unwrap();
        let mut app = file_app(&dir);

        type_text(&mut app, "Learn X");
        app.handle_key_event(press(KeyCode::Enter));
        app.handle_key_event(press(KeyCode::Esc));
        app.handle_key_event(press(KeyCode::Char('3')));
        app.handle_key_event(press(KeyCode::Char('s')));

        assert_eq!(app.step_cursor, 2);
        assert!(!app.tracker.is_dirty());
        let saved = app.tracker.storage().load().unwrap();
        assert_eq!(saved.goals[0].progress, [false, false, true, false, false]);
    }

    #[test]
    fn test_cursor_navigation_wraps() {
        let mut store = GoalStore::default();
        store.add("B");
        store.add("A");
        let mut app = App::new(Tracker::with_store(MockGoalStorage::new(), store));

        assert_eq!(app.focus, Focus::Goals);
        app.handle_key_event(press(KeyCode::Char('h')));
        assert_eq!(app.step_cursor, STEP_COUNT - 1);
        app.handle_key_event(press(KeyCode::Right));
        assert_eq!(app.step_cursor, 0);

        app.handle_key_event(press(KeyCode::Char('k')));
        assert_eq!(app.goal_selection.selected, 1);
        app.handle_key_event(press(KeyCode::Char(' ')));
        assert!(app.tracker.store().get(1).unwrap().progress[0]);
        assert!(!app.tracker.store().get(0).unwrap().progress[0]);
    }

    #[test]
    fn test_delete_selected_persists() {
        let dir = TempDir::new().unwrap();
        let mut app = file_app(&dir);

        type_text(&mut app, "Learn X");
        app.handle_key_event(press(KeyCode::Enter));
        app.handle_key_event(press(KeyCode::Esc));
        app.handle_key_event(press(KeyCode::Char('d')));

        assert!(app.tracker.store().is_empty());
        assert!(app.tracker.storage().load().unwrap().is_empty());
        assert_eq!(app.goal_selection.total, 0);
    }

    #[test]
    fn test_clear_requires_confirmation() {
        let mut store = GoalStore::default();
        store.add("A");
        store.add("B");

        let mut storage = MockGoalStorage::new();
        storage
            .expect_save()
            .withf(|store: &GoalStore| store.is_empty())
            .times(1)
            .returning(|_| Ok(()));
        let mut app = App::new(Tracker::with_store(storage, store));

        app.handle_key_event(press(KeyCode::Char('C')));
        assert_eq!(app.confirm, Some(Confirm::ClearAll));
        app.handle_key_event(press(KeyCode::Char('n')));
        assert_eq!(app.tracker.store().len(), 2);

        app.handle_key_event(press(KeyCode::Char('C')));
        app.handle_key_event(press(KeyCode::Char('y')));
        assert!(app.tracker.store().is_empty());
        assert_eq!(app.focus, Focus::Input);
    }

    #[test]
    fn test_quit_with_unsaved_changes_asks() {
        let mut app = App::new(Tracker::with_store(
            MockGoalStorage::new(),
            GoalStore::default(),
        ));
        type_text(&mut app, "Run");
        app.handle_key_event(press(KeyCode::Enter));
        app.handle_key_event(press(KeyCode::Esc));

        app.handle_key_event(press(KeyCode::Char('q')));
        assert!(app.running);
        assert_eq!(app.confirm, Some(Confirm::Quit));

        app.handle_key_event(press(KeyCode::Char('y')));
        assert!(!app.running);
    }

    #[test]
    fn test_quit_when_clean() {
        let mut store = GoalStore::default();
        store.add("A");
        let mut app = App::new(Tracker::with_store(MockGoalStorage::new(), store));

        app.handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(!app.running);
    }

    #[test]
    fn test_save_failure_shows_popup() {
        let mut store = GoalStore::default();
        store.add("A");

        let mut storage = MockGoalStorage::new();
        storage.expect_save().returning(|_| {
            Err(TrackerError::Io(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "permission denied",
            )))
        });
        let mut app = App::new(Tracker::with_store(storage, store));

        app.handle_key_event(press(KeyCode::Char('s')));
        let popup = app.error_popup.clone().unwrap();
        assert_eq!(popup.title, "Save Failed");
        assert!(popup.message.contains("permission denied"));

        // Popup swallows keys until dismissed
        app.handle_key_event(press(KeyCode::Char('j')));
        assert!(app.error_popup.is_some());
        app.handle_key_event(press(KeyCode::Esc));
        assert!(app.error_popup.is_none());
        assert!(app.running);
    }

    #[test]
    fn test_failed_delete_still_asks_before_quit() {
        let mut store = GoalStore::default();
        store.add("A");

        let mut storage = MockGoalStorage::new();
        storage.expect_save().returning(|_| {
            Err(TrackerError::Io(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "permission denied",
            )))
        });
        let mut app = App::new(Tracker::with_store(storage, store));

        app.handle_key_event(press(KeyCode::Char('d')));
        assert_eq!(app.error_popup.clone().unwrap().title, "Delete Failed");
        app.handle_key_event(press(KeyCode::Esc));

        app.handle_key_event(press(KeyCode::Char('q')));
        assert!(app.running);
        assert_eq!(app.confirm, Some(Confirm::Quit));
    }

    #[test]
    fn test_help_dismissed_by_any_key() {
        let mut store = GoalStore::default();
        store.add("A");
        let mut app = App::new(Tracker::with_store(MockGoalStorage::new(), store));

        app.handle_key_event(press(KeyCode::Char('?')));
        assert!(app.show_help);
        app.handle_key_event(press(KeyCode::Char('d')));
        assert!(!app.show_help);
        assert_eq!(app.tracker.store().len(), 1);
    }

    #[test]
    fn test_list_state_set_total_clamps() {
        let mut state = ListState::new(3);
        state.selected = 2;
        state.set_total(2);
        assert_eq!(state.selected, 1);
        state.set_total(0);
        assert_eq!(state.selected, 0);
        state.next();
        assert_eq!(state.selected, 0);
    }
}
