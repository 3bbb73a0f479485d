//! Goal model
//!
//! A goal is a text label with a fixed five-step progress vector.

use serde::{Deserialize, Serialize};

/// Number of progress checkpoints per goal
pub const STEP_COUNT: usize = 5;

/// Column labels for the progress checkpoints
pub const STEP_LABELS: [&str; STEP_COUNT] = ["20%", "40%", "60%", "80%", "100%"];

/// Progress vector of a goal
pub type Progress = [bool; STEP_COUNT];

/// A single tracked goal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    /// Goal label as typed by the user
    #[serde(rename = "goal")]
    pub text: String,
    /// Completion checkpoints, in step order
    pub progress: Progress,
}

impl Goal {
    /// Create a goal with no progress
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            progress: [false; STEP_COUNT],
        }
    }

    /// Number of checked steps
    pub fn completed_steps(&self) -> usize {
        self.progress.iter().filter(|done| **done).count()
    }

    /// Completion in percent, 20 per checked step
    pub fn percent(&self) -> u8 {
        (self.completed_steps() * 100 / STEP_COUNT) as u8
    }

    /// Whether every step is checked
    pub fn is_complete(&self) -> bool {
        self.progress.iter().all(|done| *done)
    }

    /// Flip one step, returning its new value
    ///
    /// Returns `None` when `step` is out of range.
    pub fn toggle(&mut self, step: usize) -> Option<bool> {
        let slot = self.progress.get_mut(step)?;
        *slot = !*slot;
        Some(*slot)
    }
}
