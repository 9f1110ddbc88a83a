/// Single-day snapshots across habits
///
/// This module answers "how did one day go": which habits were being
/// tracked on that day, which of them were done, and what share that makes.

use serde::{Deserialize, Serialize};
use chrono::NaiveDate;
use crate::analytics::rounded_percentage;
use crate::domain::{Completion, Habit, HabitId};

/// One habit's state within a day snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayHabit {
    pub id: HabitId,
    pub name: String,
    pub completed: bool,
}

/// Snapshot of a single day across all habits tracked on it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayData {
    pub date: NaiveDate,
    pub habits: Vec<DayHabit>,
    pub completion_percentage: u32,
}

/// Share of habits completed, as a whole percentage
///
/// Counts every `completed` record it is handed against the habit count,
/// without checking that the record's habit is in `habits` or collapsing
/// repeated records for the same habit. Callers are expected to pass one
/// day's records for the habits in question; handing in wider data can
/// push the figure past what the habit list alone would give.
pub fn daily_completion_percentage(habits: &[Habit], completions: &[Completion]) -> u32 {
    completion_percentage(habits.len(), completions)
}

/// Build the snapshot for `date` from full habit and completion collections
///
/// Habits created after `date` are left out; everything else is listed with
/// its completion state for exactly that day (no record means not done).
/// Input order is preserved, so the caller's ordering carries through to
/// the snapshot.
pub fn day_data(date: NaiveDate, habits: &[Habit], completions: &[Completion]) -> DayData {
    let day_completions: Vec<&Completion> = completions
        .iter()
        .filter(|c| c.date == date)
        .collect();

    let day_habits: Vec<DayHabit> = habits
        .iter()
        .filter(|habit| habit.created_on() <= date)
        .map(|habit| DayHabit {
            id: habit.id.clone(),
            name: habit.name.clone(),
            completed: day_completions
                .iter()
                .any(|c| c.habit_id == habit.id && c.completed),
        })
        .collect();

    let completed_count = day_completions.iter().filter(|c| c.completed).count();
    let completion_percentage = percentage_of(day_habits.len(), completed_count);

    DayData {
        date,
        habits: day_habits,
        completion_percentage,
    }
}

fn completion_percentage(habit_count: usize, completions: &[Completion]) -> u32 {
    let completed_count = completions.iter().filter(|c| c.completed).count();
    percentage_of(habit_count, completed_count)
}

fn percentage_of(habit_count: usize, completed_count: usize) -> u32 {
    if habit_count == 0 {
        return 0;
    }
    rounded_percentage(completed_count as u32, habit_count as u32)
}
