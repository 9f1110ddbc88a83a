/// Tool for monthly statistics
///
/// This module implements the habit_month_stats MCP tool.

use serde::{Deserialize, Serialize};
use chrono::Utc;
use crate::analytics::{all_monthly_habit_stats, HabitStats};
use crate::storage::HabitStore;
use crate::tools::{parse_month_arg, ToolError};

/// Parameters for monthly statistics
#[derive(Debug, Deserialize)]
pub struct MonthStatsParams {
    pub month: Option<String>, // "YYYY-MM", defaults to the current month
}

/// Response with per-habit statistics for one month
#[derive(Debug, Serialize)]
pub struct MonthStatsResponse {
    pub month: String,
    pub habits: Vec<HabitStats>,
    pub message: String,
}

/// Collect every habit's statistics for a month
///
/// Archived habits are included. They no longer appear on the daily
/// checklist, but the days they were tracked still belong to the month.
pub fn month_stats<S: HabitStore>(
    store: &S,
    params: MonthStatsParams,
) -> Result<MonthStatsResponse, ToolError> {
    let today = Utc::now().naive_utc().date();
    let month = match params.month {
        Some(ref s) => parse_month_arg(s)?,
        None => today,
    };

    let habits = store.list_habits()?;
    let completions = store.list_completions()?;

    let habit_stats = all_monthly_habit_stats(&habits, &completions, month, today);

    let month_label = month.format("%Y-%m").to_string();
    let message = if habit_stats.is_empty() {
        format!("No habits to report for {}.", month_label)
    } else {
        let lines = habit_stats
            .iter()
            .map(|s| {
                format!(
                    "🎯 {}: {}/{} days ({}%)",
                    s.habit_name, s.completed_days, s.total_days, s.completion_rate
                )
            })
            .collect::<Vec<_>>()
            .join("\n");
        format!("📊 {}\n{}", month_label, lines)
    };

    Ok(MonthStatsResponse {
        month: month_label,
        habits: habit_stats,
        message,
    })
}
