/// Completion entity for daily habit records
///
/// This module defines the Completion struct that records whether a habit
/// was done on a specific day. An explicit `completed = false` record is a
/// different thing from no record at all: it remembers that the user marked
/// the day and then unmarked it.

use serde::{Deserialize, Serialize};
use chrono::NaiveDate;
use crate::domain::{CompletionId, HabitId};

/// A record of a habit's state on a single day
///
/// There is at most one completion per habit and day. The record's ID is
/// derived from that pair, which is what makes toggling idempotent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion {
    /// Unique identifier, derived from habit and day
    pub id: CompletionId,
    /// Which habit this record is for
    pub habit_id: HabitId,
    /// Which calendar day this record is for
    pub date: NaiveDate,
    /// Whether the habit was done on that day
    pub completed: bool,
}

impl Completion {
    /// Create a record for a habit on a day
    pub fn new(habit_id: HabitId, date: NaiveDate, completed: bool) -> Self {
        Self {
            id: CompletionId::for_day(&habit_id, date),
            habit_id,
            date,
            completed,
        }
    }

    /// Create a completion from existing data (used when loading from database)
    ///
    /// Rows written by older clients may carry an ID that does not follow
    /// the derived scheme; the stored ID wins so those rows stay addressable.
    pub fn from_existing(
        id: CompletionId,
        habit_id: HabitId,
        date: NaiveDate,
        completed: bool,
    ) -> Self {
        Self {
            id,
            habit_id,
            date,
            completed,
        }
    }
}
