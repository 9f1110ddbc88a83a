/// Tools for the habit lifecycle: archive, restore, delete
///
/// This module implements the habit_archive, habit_restore and
/// habit_delete MCP tools.

use serde::{Deserialize, Serialize};
use chrono::Utc;
use crate::storage::HabitStore;
use crate::tools::{parse_habit_id, ToolError};

/// Parameters for archiving a habit
#[derive(Debug, Deserialize)]
pub struct ArchiveHabitParams {
    pub habit_id: String,
}

/// Parameters for restoring an archived habit
#[derive(Debug, Deserialize)]
pub struct RestoreHabitParams {
    pub habit_id: String,
}

/// Parameters for deleting a habit
#[derive(Debug, Deserialize)]
pub struct DeleteHabitParams {
    pub habit_id: String,
    pub hard: Option<bool>, // Defaults to false, which archives instead
}

/// Response from a lifecycle operation
#[derive(Debug, Serialize)]
pub struct ManageHabitResponse {
    pub success: bool,
    pub message: String,
}

/// Take a habit off the daily checklist, keeping its history
pub fn archive_habit<S: HabitStore>(
    store: &S,
    params: ArchiveHabitParams,
) -> Result<ManageHabitResponse, ToolError> {
    let habit_id = parse_habit_id(&params.habit_id)?;

    let mut habit = store.get_habit(&habit_id)?;
    habit.archive(Utc::now());
    store.update_habit(&habit)?;

    tracing::info!("Archived habit: {} ({})", habit.name, habit.id.to_string());

    Ok(ManageHabitResponse {
        success: true,
        message: format!(
            "📦 Archived habit '{}'. Its history stays on the calendar.",
            habit.name
        ),
    })
}

/// Bring an archived habit back into daily rotation
pub fn restore_habit<S: HabitStore>(
    store: &S,
    params: RestoreHabitParams,
) -> Result<ManageHabitResponse, ToolError> {
    let habit_id = parse_habit_id(&params.habit_id)?;

    let mut habit = store.get_habit(&habit_id)?;
    habit.restore();
    store.update_habit(&habit)?;

    tracing::info!("Restored habit: {} ({})", habit.name, habit.id.to_string());

    Ok(ManageHabitResponse {
        success: true,
        message: format!("▶️ Restored habit '{}'", habit.name),
    })
}

/// Delete a habit
///
/// The default is the safe path: the habit is archived and its records
/// stay. Passing `hard: true` removes the habit and every completion it
/// ever had.
pub fn delete_habit<S: HabitStore>(
    store: &S,
    params: DeleteHabitParams,
) -> Result<ManageHabitResponse, ToolError> {
    let habit_id = parse_habit_id(&params.habit_id)?;
    let habit = store.get_habit(&habit_id)?;

    if params.hard.unwrap_or(false) {
        store.delete_habit(&habit_id)?;

        tracing::info!("Deleted habit: {} ({})", habit.name, habit.id.to_string());

        return Ok(ManageHabitResponse {
            success: true,
            message: format!(
                "🗑️ Deleted habit '{}' and all of its completions.",
                habit.name
            ),
        });
    }

    let mut habit = habit;
    habit.archive(Utc::now());
    store.update_habit(&habit)?;

    Ok(ManageHabitResponse {
        success: true,
        message: format!(
            "📦 Archived habit '{}'. Use hard: true to remove it for good.",
            habit.name
        ),
    })
}
