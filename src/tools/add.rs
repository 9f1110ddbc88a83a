/// Tool for adding new habits
///
/// This module implements the habit_add MCP tool.

use serde::{Deserialize, Serialize};
use crate::domain::{DomainError, Habit};
use crate::storage::HabitStore;
use crate::tools::ToolError;

/// Parameters for adding a new habit
#[derive(Debug, Deserialize)]
pub struct AddHabitParams {
    pub name: String,
}

/// Response from adding a habit
#[derive(Debug, Serialize)]
pub struct AddHabitResponse {
    pub success: bool,
    pub habit_id: String,
    pub restored: bool,
    pub message: String,
}

/// Names are compared trimmed and lowercased, so "read" and " READ " name the same habit
fn normalized(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Add a habit, or restore an archived habit of the same name
///
/// An active habit with a matching normalized name is a conflict. An
/// archived one is brought back instead, so its history reattaches to
/// the name rather than starting over as a duplicate.
pub fn add_habit<S: HabitStore>(
    store: &S,
    params: AddHabitParams,
) -> Result<AddHabitResponse, ToolError> {
    let wanted = normalized(&params.name);
    let habits = store.list_habits()?;

    if habits
        .iter()
        .any(|h| h.active && normalized(&h.name) == wanted)
    {
        return Err(ToolError::Domain(DomainError::DuplicateHabitName(
            params.name.trim().to_string(),
        )));
    }

    if let Some(archived) = habits
        .iter()
        .find(|h| !h.active && normalized(&h.name) == wanted)
    {
        let mut habit = archived.clone();
        habit.restore();
        store.update_habit(&habit)?;

        tracing::info!("Restored habit: {} ({})", habit.name, habit.id.to_string());

        return Ok(AddHabitResponse {
            success: true,
            habit_id: habit.id.to_string(),
            restored: true,
            message: format!("♻️ Restored habit '{}' from the archive!", habit.name),
        });
    }

    let habit = Habit::new(params.name)?;
    store.create_habit(&habit)?;

    tracing::info!("Added habit: {} ({})", habit.name, habit.id.to_string());

    Ok(AddHabitResponse {
        success: true,
        habit_id: habit.id.to_string(),
        restored: false,
        message: format!(
            "✅ Added habit '{}'! Check it off each day to build a streak.",
            habit.name
        ),
    })
}
