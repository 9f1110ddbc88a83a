/// The Habit entity and its lifecycle
///
/// A habit is something the user wants to do every day. This module holds
/// the struct itself, name validation, and the archive/restore transitions.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, Utc};
use crate::domain::{DomainError, HabitId};

/// A habit the user checks off day by day
///
/// Habits are never edited after creation apart from their lifecycle state:
/// an active habit can be archived (it keeps its history but stops counting
/// new days) and an archived habit can be restored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Habit {
    /// Stable identifier; completions reference it
    pub id: HabitId,
    /// Display name (e.g., "Morning Run", "Read 20 pages")
    pub name: String,
    /// When this habit was created; its day is the first day that counts
    pub created_at: DateTime<Utc>,
    /// Whether this habit is currently tracked
    pub active: bool,
    /// When this habit was archived, if it is archived
    pub archived_at: Option<DateTime<Utc>>,
}

impl Habit {
    /// Create a habit from a user-supplied name
    ///
    /// The name is trimmed before it is stored. Creation time is the
    /// current instant; statistics count days from that day onward.
    pub fn new(name: String) -> Result<Self, DomainError> {
        Self::validate_name(&name)?;

        Ok(Self {
            id: HabitId::new(),
            name: name.trim().to_string(),
            created_at: Utc::now(),
            active: true,
            archived_at: None,
        })
    }

    /// Rebuild a habit from stored fields
    ///
    /// The storage layer uses this when reading rows back; the values are
    /// trusted to have been validated when they were first written.
    pub fn from_existing(
        id: HabitId,
        name: String,
        created_at: DateTime<Utc>,
        active: bool,
        archived_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            name,
            created_at,
            active,
            archived_at,
        }
    }

    /// Mark the habit archived as of the given instant
    ///
    /// History stays in place; days after the archive day no longer count
    /// toward the habit's statistics.
    pub fn archive(&mut self, at: DateTime<Utc>) {
        self.active = false;
        self.archived_at = Some(at);
    }

    /// Bring an archived habit back into daily rotation
    pub fn restore(&mut self) {
        self.active = true;
        self.archived_at = None;
    }

    /// Calendar day the habit became trackable
    pub fn created_on(&self) -> NaiveDate {
        self.created_at.naive_utc().date()
    }

    /// Calendar day tracking stopped, when archived
    pub fn archived_on(&self) -> Option<NaiveDate> {
        self.archived_at.map(|at| at.naive_utc().date())
    }

    /// Name rules: nonempty after trimming, at most 100 characters
    fn validate_name(name: &str) -> Result<(), DomainError> {
        let trimmed = name.trim();

        if trimmed.is_empty() {
            return Err(DomainError::InvalidHabitName(
                "Habit name cannot be empty".to_string()
            ));
        }

        if trimmed.len() > 100 {
            return Err(DomainError::InvalidHabitName(
                "Habit name cannot be longer than 100 characters".to_string()
            ));
        }

        Ok(())
    }
}
