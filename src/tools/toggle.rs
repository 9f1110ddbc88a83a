/// Tool for marking and unmarking a habit on a day
///
/// This module implements the habit_toggle MCP tool.

use serde::{Deserialize, Serialize};
use chrono::Utc;
use crate::domain::calculate_streak;
use crate::storage::HabitStore;
use crate::tools::{parse_date_arg, parse_habit_id, ToolError};

/// Parameters for toggling a habit's daily record
#[derive(Debug, Deserialize)]
pub struct ToggleParams {
    pub habit_id: String,
    pub date: Option<String>, // Optional day, defaults to today
}

/// Response from toggling a habit
#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub success: bool,
    pub completed: bool,
    pub current_streak: u32,
    pub message: String,
}

/// Flip a habit's done state for a day
///
/// The first toggle on an unmarked day marks it done; toggling again
/// unmarks it. The response carries the streak as it stands after the
/// write, recomputed from the full history.
pub fn toggle_habit<S: HabitStore>(
    store: &S,
    params: ToggleParams,
) -> Result<ToggleResponse, ToolError> {
    let habit_id = parse_habit_id(&params.habit_id)?;

    // Verify the habit exists before writing anything
    let habit = store.get_habit(&habit_id)?;

    let today = Utc::now().naive_utc().date();
    let date = match params.date {
        Some(ref s) => parse_date_arg(s)?,
        None => today,
    };

    let completed = store.toggle_completion(&habit_id, date)?;

    let completions = store.list_completions()?;
    let streak = calculate_streak(&habit_id, &completions, today);

    let message = if completed {
        format!(
            "🔥 Marked '{}' done for {}. Current streak: {} day{}",
            habit.name,
            date,
            streak.current,
            if streak.current == 1 { "" } else { "s" }
        )
    } else {
        format!("↩️ Unmarked '{}' for {}.", habit.name, date)
    };

    Ok(ToggleResponse {
        success: true,
        completed,
        current_streak: streak.current,
        message,
    })
}
