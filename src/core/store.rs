//! In-memory goal collection
//!
//! `GoalStore` is the whole persisted document. All mutation goes through
//! the update functions here so the list can be tested without a UI or a
//! file behind it.

use serde::{Deserialize, Serialize};

use crate::core::goal::{Goal, STEP_COUNT};
use crate::error::{Result, TrackerError};

/// Ordered goal list, newest first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalStore {
    /// Goals in display order
    #[serde(default)]
    pub goals: Vec<Goal>,
}

impl GoalStore {
    /// Create a store from an existing goal list
    pub fn from_goals(goals: Vec<Goal>) -> Self {
        Self { goals }
    }

    pub fn len(&self) -> usize {
        self.goals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Goal> {
        self.goals.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Goal> {
        self.goals.iter()
    }

    /// Prepend a new goal with no progress
    ///
    /// Text is trimmed before storing. Returns `false` and leaves the list
    /// untouched when the trimmed text is empty.
    pub fn add(&mut self, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        self.goals.insert(0, Goal::new(text));
        true
    }

    /// Remove every goal whose text equals `text`
    ///
    /// Returns the number of goals removed.
    pub fn delete(&mut self, text: &str) -> usize {
        let before = self.goals.len();
        self.goals.retain(|goal| goal.text != text);
        before - self.goals.len()
    }

    /// Remove all goals
    pub fn clear(&mut self) {
        self.goals.clear();
    }

    /// Flip one progress step of one goal, returning its new value
    pub fn toggle(&mut self, goal: usize, step: usize) -> Result<bool> {
        if step >= STEP_COUNT {
            return Err(TrackerError::StepOutOfRange(step));
        }
        let entry = self
            .goals
            .get_mut(goal)
            .ok_or(TrackerError::GoalNotFound(goal))?;
        entry.toggle(step).ok_or(TrackerError::StepOutOfRange(step))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(store: &GoalStore) -> Vec<&str> {
        store.iter().map(|g| g.text.as_str()).collect()
    }

    #[test]
    fn test_add_prepends() {
        let mut store = GoalStore::default();
        assert!(store.add("First"));
        assert!(store.add("Second"));
        assert_eq!(texts(&store), vec!["Second", "First"]);
        assert_eq!(store.get(0).unwrap().progress, [false; STEP_COUNT]);
    }

    #[test]
    fn test_add_trims_text() {
        let mut store = GoalStore::default();
        assert!(store.add("  Learn X \n"));
        assert_eq!(texts(&store), vec!["Learn X"]);
    }

    #[test]
    fn test_add_blank_is_noop() {
        let mut store = GoalStore::from_goals(vec![Goal::new("Keep")]);
        let before = store.clone();

        assert!(!store.add(""));
        assert!(!store.add("   "));
        assert!(!store.add("\t\n"));
        assert_eq!(store, before);
    }

    #[test]
    fn test_delete_removes_all_duplicates() {
        let mut store = GoalStore::default();
        store.add("Run");
        store.add("Read");
        store.add("Run");

        assert_eq!(store.delete("Run"), 2);
        assert_eq!(texts(&store), vec!["Read"]);
    }

    #[test]
    fn test_delete_unknown_text() {
        let mut store = GoalStore::default();
        store.add("Read");
        assert_eq!(store.delete("Write"), 0);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_clear() {
        let mut store = GoalStore::default();
        store.add("A");
        store.add("B");
        store.clear();
        assert!(store.is_empty());
    }

    #[test]
    fn test_toggle() {
        let mut store = GoalStore::default();
        store.add("Learn X");

        assert!(store.toggle(0, 2).unwrap());
        assert_eq!(
            store.get(0).unwrap().progress,
            [false, false, true, false, false]
        );
        assert!(!store.toggle(0, 2).unwrap());
    }

    #[test]
    fn test_toggle_out_of_range() {
        let mut store = GoalStore::default();
        store.add("Learn X");

        assert!(matches!(
            store.toggle(1, 0),
            Err(TrackerError::GoalNotFound(1))
        ));
        assert!(matches!(
            store.toggle(0, STEP_COUNT),
            Err(TrackerError::StepOutOfRange(5))
        ));
    }

    #[test]
    fn test_missing_goals_key_is_empty() {
        let store: GoalStore = serde_json::from_str("{}").unwrap();
        assert!(store.is_empty());
    }
}
