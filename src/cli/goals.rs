//! Goal CLI command handlers
//!
//! Every invocation is a short-lived session, so commands that change the
//! list finish with an explicit save.

use std::io::{self, Write};

use crate::cli::commands::Commands;
use crate::core::goal::STEP_LABELS;
use crate::core::storage::GoalStorage;
use crate::core::store::GoalStore;
use crate::core::tracker::{Command, Outcome, Tracker};
use crate::error::{Result, TrackerError};

/// Width of the goal text column in `list` output
const GOAL_COLUMN_WIDTH: usize = 32;

/// Handle goal commands
pub fn handle_goals<S: GoalStorage>(command: Commands, tracker: &mut Tracker<S>) -> Result<()> {
    match command {
        Commands::List => handle_list(tracker),
        Commands::Add { text } => handle_add(tracker, text),
        Commands::Delete { text } => handle_delete(tracker, text),
        Commands::Toggle { goal, step } => {
            handle_toggle(tracker, goal as usize - 1, step as usize - 1)
        }
        Commands::Clear { force } => handle_clear(tracker, force),
        Commands::Config(_) => unreachable!(),
    }
}

fn handle_list<S: GoalStorage>(tracker: &Tracker<S>) -> Result<()> {
    let store = tracker.store();

    if store.is_empty() {
        println!("No goals yet.");
        println!("  → Add one with: growth add \"Learn something new\"");
        return Ok(());
    }

    print!("{}", format_goal_table(store));
    Ok(())
}

fn handle_add<S: GoalStorage>(tracker: &mut Tracker<S>, text: String) -> Result<()> {
    let label = text.trim().to_string();
    match tracker.dispatch(Command::Add(text))? {
        Outcome::Unchanged => Err(TrackerError::EmptyGoal),
        _ => {
            tracker.dispatch(Command::SaveAll)?;
            println!("✓ Added goal '{}'", label);
            Ok(())
        }
    }
}

fn handle_delete<S: GoalStorage>(tracker: &mut Tracker<S>, text: String) -> Result<()> {
    // Goals are stored trimmed
    let text = text.trim().to_string();
    let before = tracker.store().len();
    tracker.dispatch(Command::Delete(text.clone()))?;
    let removed = before - tracker.store().len();

    match removed {
        0 => println!("No goal named '{}' was found.", text),
        1 => println!("✓ Deleted goal '{}'", text),
        n => println!("✓ Deleted {} goals named '{}'", n, text),
    }
    Ok(())
}

fn handle_toggle<S: GoalStorage>(tracker: &mut Tracker<S>, goal: usize, step: usize) -> Result<()> {
    tracker.dispatch(Command::Toggle { goal, step })?;
    tracker.dispatch(Command::SaveAll)?;

    // Toggle succeeded, so both indices are valid
    if let Some(entry) = tracker.store().get(goal) {
        let state = if entry.progress[step] { "done" } else { "not done" };
        println!(
            "✓ '{}' {} marked {} ({}% complete)",
            entry.text, STEP_LABELS[step], state, entry.percent()
        );
    }
    Ok(())
}

fn handle_clear<S: GoalStorage>(tracker: &mut Tracker<S>, force: bool) -> Result<()> {
    let count = tracker.store().len();

    // Confirm unless --force
    if !force && count > 0 {
        print!("Delete all {} goals? [y/N] ", count);
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Cancelled.");
            return Ok(());
        }
    }

    tracker.dispatch(Command::ClearAll)?;
    println!("✓ Cleared all goals");
    Ok(())
}

/// Render the goal list as a plain-text progress grid
pub fn format_goal_table(store: &GoalStore) -> String {
    let mut out = String::new();

    out.push_str(&format!("  {:>3}  {:<width$}", "#", "Goal", width = GOAL_COLUMN_WIDTH));
    for label in STEP_LABELS {
        out.push_str(&format!(" {:>4}", label));
    }
    out.push('\n');

    for (i, goal) in store.iter().enumerate() {
        out.push_str(&format!(
            "  {:>3}  {:<width$}",
            i + 1,
            truncate(&goal.text, GOAL_COLUMN_WIDTH),
            width = GOAL_COLUMN_WIDTH
        ));
        for done in goal.progress {
            out.push_str(&format!(" {:>4}", if done { "[x]" } else { "[ ]" }));
        }
        out.push('\n');
    }

    out
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{}…", kept)
    }
}
