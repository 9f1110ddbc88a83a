/// Streak calculation over completion history
///
/// This module computes the current and longest run of consecutive
/// completed days for a habit from its raw completion records.

use serde::{Deserialize, Serialize};
use chrono::{Duration, NaiveDate};
use std::collections::HashSet;
use crate::domain::{Completion, HabitId};

/// Current and longest consecutive-day runs for a habit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakSummary {
    /// Length of the run that is still alive, in days
    pub current: u32,
    /// Length of the best run ever achieved, in days
    pub longest: u32,
}

impl StreakSummary {
    /// Summary for a habit with no completed days yet
    pub fn zero() -> Self {
        Self {
            current: 0,
            longest: 0,
        }
    }
}

/// Calculate streaks for one habit from its completion history
///
/// Only records for `habit_id` with `completed` set count. A run that ends
/// yesterday is still alive: the user gets the whole of `today` to keep it
/// going. Marking the same day more than once neither lengthens nor breaks
/// a run.
pub fn calculate_streak(
    habit_id: &HabitId,
    completions: &[Completion],
    today: NaiveDate,
) -> StreakSummary {
    let mut days: Vec<NaiveDate> = completions
        .iter()
        .filter(|c| c.habit_id == *habit_id && c.completed)
        .map(|c| c.date)
        .collect();

    if days.is_empty() {
        return StreakSummary::zero();
    }

    days.sort();

    let current = current_streak(&days, today);
    let longest = longest_streak(&days);

    StreakSummary { current, longest }
}

/// Count the run that is still alive, walking backward from the most
/// recent completed day
///
/// The run is dead unless the most recent day is today or yesterday.
fn current_streak(sorted_days: &[NaiveDate], today: NaiveDate) -> u32 {
    let last = sorted_days[sorted_days.len() - 1];
    let yesterday = today - Duration::days(1);

    if last != today && last != yesterday {
        return 0;
    }

    let day_set: HashSet<NaiveDate> = sorted_days.iter().copied().collect();
    let mut streak = 0;
    let mut checking_date = last;

    while day_set.contains(&checking_date) {
        streak += 1;
        checking_date = checking_date - Duration::days(1);
    }

    streak
}

/// Find the longest run in the whole history
///
/// Walks the days oldest first; a one-day step extends the run, a larger
/// gap starts a new one, and a repeated day changes nothing.
fn longest_streak(sorted_days: &[NaiveDate]) -> u32 {
    let mut longest = 1;
    let mut run = 1;
    let mut last_date = sorted_days[0];

    for &date in sorted_days.iter().skip(1) {
        let days_diff = (date - last_date).num_days();

        if days_diff == 1 {
            run += 1;
        } else if days_diff > 1 {
            longest = longest.max(run);
            run = 1;
        }
        // days_diff == 0 is a duplicate record for an already-counted day

        last_date = date;
    }

    longest.max(run)
}
