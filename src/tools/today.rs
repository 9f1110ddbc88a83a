/// Tool for the day's checklist view
///
/// This module implements the habit_today MCP tool.

use serde::{Deserialize, Serialize};
use chrono::Utc;
use crate::analytics::{day_data, DayData};
use crate::storage::HabitStore;
use crate::tools::{parse_date_arg, ToolError};

/// Parameters for the day view
#[derive(Debug, Deserialize)]
pub struct TodayParams {
    pub date: Option<String>, // Optional day, defaults to today
}

/// Response with the day's checklist
#[derive(Debug, Serialize)]
pub struct TodayResponse {
    pub day: DayData,
    pub message: String,
}

/// Build the checklist for a day across all active habits
///
/// Archived habits stay off the checklist; their history remains visible
/// through the calendar and monthly views.
pub fn today_view<S: HabitStore>(
    store: &S,
    params: TodayParams,
) -> Result<TodayResponse, ToolError> {
    let date = match params.date {
        Some(ref s) => parse_date_arg(s)?,
        None => Utc::now().naive_utc().date(),
    };

    let habits: Vec<_> = store
        .list_habits()?
        .into_iter()
        .filter(|h| h.active)
        .collect();
    let completions = store.completions_for_date(date)?;

    let day = day_data(date, &habits, &completions);

    let message = if day.habits.is_empty() {
        "No habits tracked for this day yet. Add one to get started!".to_string()
    } else {
        let done = day.habits.iter().filter(|h| h.completed).count();
        let lines = day
            .habits
            .iter()
            .map(|h| format!("{} {}", if h.completed { "✅" } else { "⬜" }, h.name))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "📅 {}: {}/{} done ({}%)\n{}",
            day.date,
            done,
            day.habits.len(),
            day.completion_percentage,
            lines
        )
    };

    Ok(TodayResponse { day, message })
}
