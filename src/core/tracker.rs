//! Tracker session
//!
//! Owns the in-memory [`GoalStore`] and its [`GoalStorage`] backend, and
//! applies user [`Command`]s to them. Presentation layers only ever talk to
//! the tracker through `dispatch` and read the state back through `store`.
//!
//! Persistence rules:
//! - `Delete` and `ClearAll` save immediately
//! - `SaveAll` saves
//! - `Add` and `Toggle` stay in memory until the next save

use chrono::{DateTime, Local};
use tracing::{debug, info};

use crate::core::storage::GoalStorage;
use crate::core::store::GoalStore;
use crate::error::Result;

/// A user action on the goal list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Add a goal with the given text
    Add(String),
    /// Delete every goal with the given text
    Delete(String),
    /// Flip one progress step (zero-based indices)
    Toggle { goal: usize, step: usize },
    /// Remove all goals
    ClearAll,
    /// Persist the current list
    SaveAll,
}

/// Result of dispatching a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing changed (e.g. blank goal text)
    Unchanged,
    /// In-memory state changed, not yet saved
    Changed,
    /// State was written to storage
    Saved,
}

/// Goal tracking session
pub struct Tracker<S: GoalStorage> {
    storage: S,
    store: GoalStore,
    dirty: bool,
    revision: u64,
    last_saved: Option<DateTime<Local>>,
}

impl<S: GoalStorage> Tracker<S> {
    /// Open a session, loading whatever the storage holds
    pub fn open(storage: S) -> Result<Self> {
        let store = storage.load()?;
        info!(goals = store.len(), "Goal tracker opened");
        Ok(Self::with_store(storage, store))
    }

    /// Start a session from an already loaded store
    pub fn with_store(storage: S, store: GoalStore) -> Self {
        Self {
            storage,
            store,
            dirty: false,
            revision: 0,
            last_saved: None,
        }
    }

    /// Current goal list
    pub fn store(&self) -> &GoalStore {
        &self.store
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Whether there are in-memory changes not yet saved
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Counter bumped on every state change, for change detection
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Time of the last successful save in this session
    pub fn last_saved(&self) -> Option<DateTime<Local>> {
        self.last_saved
    }

    /// Apply a command to the session
    pub fn dispatch(&mut self, command: Command) -> Result<Outcome> {
        debug!(?command, "Dispatching command");

        match command {
            Command::Add(text) => {
                if !self.store.add(&text) {
                    return Ok(Outcome::Unchanged);
                }
                self.mark_changed();
                Ok(Outcome::Changed)
            }
            Command::Toggle { goal, step } => {
                self.store.toggle(goal, step)?;
                self.mark_changed();
                Ok(Outcome::Changed)
            }
            Command::Delete(text) => {
                let removed = self.store.delete(&text);
                if removed > 0 {
                    self.mark_changed();
                }
                self.save()
            }
            Command::ClearAll => {
                self.store.clear();
                self.mark_changed();
                self.save()
            }
            Command::SaveAll => self.save(),
        }
    }

    fn mark_changed(&mut self) {
        self.dirty = true;
        self.revision += 1;
    }

    fn save(&mut self) -> Result<Outcome> {
        self.storage.save(&self.store)?;
        self.dirty = false;
        self.last_saved = Some(Local::now());
        info!(goals = self.store.len(), "All progress saved");
        Ok(Outcome::Saved)
    }
}
