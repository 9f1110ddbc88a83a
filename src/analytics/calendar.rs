/// Month calendar classification
///
/// This module turns day snapshots into the calendar view's vocabulary:
/// each day is empty, partial, full, or still in the future, and a month
/// rolls up into perfect/partial day counts with a success rate.

use serde::{Deserialize, Serialize};
use chrono::{Datelike, Duration, NaiveDate};
use crate::analytics::{day_data, rounded_percentage};
use crate::domain::{Completion, Habit};

/// How a single calendar day went
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayStatus {
    /// The day is after today and has not happened yet
    Future,
    /// Nothing was tracked or nothing was done
    Empty,
    /// Some habits were done, but not all of them
    Partial,
    /// Every tracked habit was done
    Full,
}

/// Rollup of a month's days, ignoring days that have not happened yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthSummary {
    /// Days where every tracked habit was done
    pub perfect: u32,
    /// Days where some but not all habits were done
    pub partial: u32,
    /// Days counted (everything up to and including today)
    pub tracked: u32,
    /// Share of counted days that were perfect, as a whole percentage
    pub success_rate: u32,
}

/// First and last day of the month containing `date`
pub fn month_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let (year, month) = (date.year(), date.month());
    let start = NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(date);

    let next_month_start = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    let end = next_month_start
        .map(|d| d - Duration::days(1))
        .unwrap_or(date);

    (start, end)
}

/// Every day of the month containing `date`, oldest first
pub fn days_of_month(date: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    let (start, end) = month_bounds(date);
    start.iter_days().take_while(move |d| *d <= end)
}

/// Classify one day for the calendar
///
/// Days after `today` are `Future`. For the rest, the day's snapshot
/// decides: no tracked habits or nothing done is `Empty`, exactly 100
/// percent is `Full`, and anything in between is `Partial`.
pub fn day_status(
    date: NaiveDate,
    habits: &[Habit],
    completions: &[Completion],
    today: NaiveDate,
) -> DayStatus {
    if date > today {
        return DayStatus::Future;
    }

    let snapshot = day_data(date, habits, completions);

    if snapshot.habits.is_empty() {
        DayStatus::Empty
    } else if snapshot.completion_percentage == 100 {
        DayStatus::Full
    } else if snapshot.completion_percentage > 0 {
        DayStatus::Partial
    } else {
        DayStatus::Empty
    }
}

/// Roll a month up into perfect/partial counts and a success rate
///
/// Future days are left out entirely; an empty day still counts as a
/// tracked day that simply was not perfect.
pub fn month_summary(
    habits: &[Habit],
    completions: &[Completion],
    month: NaiveDate,
    today: NaiveDate,
) -> MonthSummary {
    let mut perfect = 0;
    let mut partial = 0;
    let mut tracked = 0;

    for date in days_of_month(month) {
        match day_status(date, habits, completions, today) {
            DayStatus::Future => {}
            DayStatus::Full => {
                perfect += 1;
                tracked += 1;
            }
            DayStatus::Partial => {
                partial += 1;
                tracked += 1;
            }
            DayStatus::Empty => {
                tracked += 1;
            }
        }
    }

    MonthSummary {
        perfect,
        partial,
        tracked,
        success_rate: rounded_percentage(perfect, tracked),
    }
}
