/// Tool for the month calendar view
///
/// This module implements the habit_calendar MCP tool.

use serde::{Deserialize, Serialize};
use chrono::{NaiveDate, Utc};
use crate::analytics::{
    day_data, day_status, days_of_month, month_summary, DayStatus, MonthSummary,
};
use crate::storage::HabitStore;
use crate::tools::{parse_month_arg, ToolError};

/// Parameters for the calendar view
#[derive(Debug, Deserialize)]
pub struct CalendarParams {
    pub month: Option<String>, // "YYYY-MM", defaults to the current month
}

/// One calendar day with its aggregate state
#[derive(Debug, Serialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub status: DayStatus,
    pub completion_percentage: u32,
}

/// Response with the month grid and its summary line
#[derive(Debug, Serialize)]
pub struct CalendarResponse {
    pub month: String,
    pub days: Vec<CalendarDay>,
    pub summary: MonthSummary,
    pub message: String,
}

/// Build the calendar for a month across all habits
///
/// Archived habits keep their marks here even though they are gone from
/// the daily checklist.
pub fn month_calendar<S: HabitStore>(
    store: &S,
    params: CalendarParams,
) -> Result<CalendarResponse, ToolError> {
    let today = Utc::now().naive_utc().date();
    let month = match params.month {
        Some(ref s) => parse_month_arg(s)?,
        None => today,
    };

    let habits = store.list_habits()?;
    let completions = store.list_completions()?;

    let days: Vec<CalendarDay> = days_of_month(month)
        .map(|date| {
            let status = day_status(date, &habits, &completions, today);
            let snapshot = day_data(date, &habits, &completions);
            CalendarDay {
                date,
                status,
                completion_percentage: snapshot.completion_percentage,
            }
        })
        .collect();

    let summary = month_summary(&habits, &completions, month, today);

    let strip: String = days
        .iter()
        .map(|d| match d.status {
            DayStatus::Full => "🟩",
            DayStatus::Partial => "🟨",
            DayStatus::Empty => "⬜",
            DayStatus::Future => "▫️",
        })
        .collect();

    let month_label = month.format("%Y-%m").to_string();
    let message = format!(
        "🗓️ {}\n{}\n{} perfect, {} partial across {} tracked days ({}% perfect)",
        month_label, strip, summary.perfect, summary.partial, summary.tracked, summary.success_rate
    );

    Ok(CalendarResponse {
        month: month_label,
        days,
        summary,
        message,
    })
}
