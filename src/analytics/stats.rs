/// All-time and month-scoped habit statistics
///
/// This module aggregates a habit's completion history into the numbers the
/// list and analytics views show: days tracked, days completed, streaks,
/// and the completion rate.

use serde::{Deserialize, Serialize};
use chrono::NaiveDate;
use crate::analytics::{month_bounds, rounded_percentage};
use crate::domain::{calculate_streak, Completion, Habit, HabitId};

/// Aggregated statistics for one habit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitStats {
    pub habit_id: HabitId,
    pub habit_name: String,
    /// Days the habit was expected to be tracked in the reporting window
    pub total_days: u32,
    /// Days it was actually completed in the reporting window
    pub completed_days: u32,
    pub current_streak: u32,
    pub longest_streak: u32,
    /// completed_days over total_days, as a whole percentage
    pub completion_rate: u32,
}

impl HabitStats {
    /// All-zero statistics for a habit with no countable days
    fn zero(habit: &Habit) -> Self {
        Self {
            habit_id: habit.id.clone(),
            habit_name: habit.name.clone(),
            total_days: 0,
            completed_days: 0,
            current_streak: 0,
            longest_streak: 0,
            completion_rate: 0,
        }
    }
}

/// All-time statistics for a habit
///
/// `total_days` spans from the habit's creation day through `today`, both
/// inclusive; `completed_days` counts every completed record in the
/// habit's history.
pub fn habit_stats(habit: &Habit, completions: &[Completion], today: NaiveDate) -> HabitStats {
    let completed_days = completions
        .iter()
        .filter(|c| c.habit_id == habit.id && c.completed)
        .count() as u32;

    let span = (today - habit.created_on()).num_days() + 1;
    let total_days = span.max(0) as u32;

    let streak = calculate_streak(&habit.id, completions, today);

    HabitStats {
        habit_id: habit.id.clone(),
        habit_name: habit.name.clone(),
        total_days,
        completed_days,
        current_streak: streak.current,
        longest_streak: streak.longest,
        completion_rate: rounded_percentage(completed_days, total_days),
    }
}

/// All-time statistics for every habit, keeping the input order
pub fn all_habit_stats(
    habits: &[Habit],
    completions: &[Completion],
    today: NaiveDate,
) -> Vec<HabitStats> {
    habits
        .iter()
        .map(|habit| habit_stats(habit, completions, today))
        .collect()
}

/// Statistics for a habit within the month containing `month`
///
/// Day counting is clipped to the habit's window inside the month: it
/// starts at the habit's creation day or the first of the month, whichever
/// is later, and ends at month end, pulled back to `today` while the month
/// is still running and to the archive day for archived habits. A habit
/// with no countable window in the month gets an all-zero record.
///
/// The streak fields are the exception: they carry the habit's full-history
/// streaks unchanged, because a streak that crosses a month boundary is
/// still one streak.
pub fn monthly_habit_stats(
    habit: &Habit,
    completions: &[Completion],
    month: NaiveDate,
    today: NaiveDate,
) -> HabitStats {
    let (month_start, month_end) = month_bounds(month);
    let archived_on = habit.archived_on();

    let completed_days = completions
        .iter()
        .filter(|c| c.habit_id == habit.id && c.completed)
        .filter(|c| c.date >= month_start && c.date <= month_end)
        .filter(|c| match archived_on {
            Some(archive_day) => c.date <= archive_day,
            None => true,
        })
        .count() as u32;

    let effective_start = habit.created_on().max(month_start);

    let mut effective_end = month_end;
    if today >= month_start && today <= month_end {
        effective_end = today;
    }
    if let Some(archive_day) = archived_on {
        if archive_day < effective_end {
            effective_end = archive_day;
        }
    }

    if effective_start > effective_end || month_start > today {
        return HabitStats::zero(habit);
    }
    if let Some(archive_day) = archived_on {
        if effective_start > archive_day {
            return HabitStats::zero(habit);
        }
    }

    let span = (effective_end - effective_start).num_days() + 1;
    let total_days = span.max(0) as u32;

    let streak = calculate_streak(&habit.id, completions, today);

    HabitStats {
        habit_id: habit.id.clone(),
        habit_name: habit.name.clone(),
        total_days,
        completed_days,
        current_streak: streak.current,
        longest_streak: streak.longest,
        completion_rate: rounded_percentage(completed_days, total_days),
    }
}

/// Month statistics for every habit, keeping the input order
pub fn all_monthly_habit_stats(
    habits: &[Habit],
    completions: &[Completion],
    month: NaiveDate,
    today: NaiveDate,
) -> Vec<HabitStats> {
    habits
        .iter()
        .map(|habit| monthly_habit_stats(habit, completions, month, today))
        .collect()
}
