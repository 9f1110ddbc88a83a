/// Identifier types used throughout the domain layer
///
/// This module defines the ID newtypes for habits and completions so the
/// two can never be mixed up in a function signature.

use serde::{Deserialize, Serialize};
use chrono::NaiveDate;
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a habit
///
/// This is a wrapper around UUID to provide type safety - you can't
/// accidentally pass a habit ID where a completion ID is expected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HabitId(pub Uuid);

impl HabitId {
    /// Generate a new random habit ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a habit ID from a string (useful for database loading)
    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl fmt::Display for HabitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Unique identifier for a daily completion record
///
/// Unlike habit IDs these are not random: the key is derived from the habit
/// and the day, so marking the same day twice always addresses the same
/// record. That keeps the toggle operation an upsert rather than an insert.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompletionId(pub String);

impl CompletionId {
    /// Derive the ID for a habit's record on a given day
    pub fn for_day(habit_id: &HabitId, date: NaiveDate) -> Self {
        Self(format!("{}-{}", habit_id, date))
    }

    /// Create a completion ID from a string (useful for database loading)
    pub fn from_string(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for CompletionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
