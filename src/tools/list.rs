/// Tool for listing habits with their all-time statistics
///
/// This module implements the habit_list MCP tool.

use serde::{Deserialize, Serialize};
use chrono::Utc;
use crate::analytics::{all_habit_stats, HabitStats};
use crate::storage::HabitStore;
use crate::tools::ToolError;

/// Parameters for listing habits
#[derive(Debug, Deserialize)]
pub struct ListHabitsParams {
    pub include_archived: Option<bool>, // Defaults to false
}

/// One habit with its lifecycle state and all-time statistics
#[derive(Debug, Serialize)]
pub struct HabitListItem {
    pub active: bool,
    pub stats: HabitStats,
}

/// Response from listing habits
#[derive(Debug, Serialize)]
pub struct ListHabitsResponse {
    pub habits: Vec<HabitListItem>,
    pub message: String,
}

/// List habits in creation order with streaks and completion rates
pub fn list_habits<S: HabitStore>(
    store: &S,
    params: ListHabitsParams,
) -> Result<ListHabitsResponse, ToolError> {
    let include_archived = params.include_archived.unwrap_or(false);
    let today = Utc::now().naive_utc().date();

    let mut habits = store.list_habits()?;
    if !include_archived {
        habits.retain(|h| h.active);
    }
    let completions = store.list_completions()?;

    let stats = all_habit_stats(&habits, &completions, today);

    let items: Vec<HabitListItem> = habits
        .iter()
        .zip(stats)
        .map(|(habit, stats)| HabitListItem {
            active: habit.active,
            stats,
        })
        .collect();

    let message = if items.is_empty() {
        "No habits yet. Add your first habit to get started!".to_string()
    } else {
        items
            .iter()
            .map(|item| {
                format!(
                    "🎯 {}{}\n   Current streak: {} days | Best: {} days | Rate: {}%",
                    item.stats.habit_name,
                    if item.active { "" } else { " 📦 (archived)" },
                    item.stats.current_streak,
                    item.stats.longest_streak,
                    item.stats.completion_rate
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    };

    Ok(ListHabitsResponse {
        habits: items,
        message,
    })
}
