/// Analytics over habit and completion snapshots
///
/// Pure functions from (habits, completions, dates) to day snapshots,
/// statistics, and calendar classifications. Nothing in this module reads
/// the clock or touches storage: callers pass the collections and the
/// current day in, which is what makes every result reproducible.

pub mod calendar;
pub mod day;
pub mod stats;

// Re-export public types for easy access
pub use calendar::*;
pub use day::*;
pub use stats::*;

/// Whole-number percentage, rounded to the nearest integer
///
/// A zero total yields zero rather than a division error.
pub(crate) fn rounded_percentage(count: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    (count as f64 / total as f64 * 100.0).round() as u32
}
