/// Storage layer for persisting habit data
///
/// This module handles all database operations using SQLite. It provides
/// a clean interface for storing and retrieving habits and their daily
/// completion records.

pub mod sqlite;
pub mod migrations;

// Re-export the main storage types
pub use sqlite::*;

use chrono::NaiveDate;
use thiserror::Error;
use crate::domain::{Completion, Habit, HabitId};

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Database query error: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("Habit not found: {habit_id}")]
    HabitNotFound { habit_id: String },

    #[error("Migration error: {0}")]
    Migration(String),
}

/// Trait defining the storage interface for habits and completions
///
/// This trait allows us to potentially swap out SQLite for other backends
/// while keeping the same interface. The analytics layer never talks to
/// the database directly; everything it consumes is loaded through here.
pub trait HabitStore {
    /// Create a new habit
    fn create_habit(&self, habit: &Habit) -> Result<(), StoreError>;

    /// Get a habit by ID
    fn get_habit(&self, habit_id: &HabitId) -> Result<Habit, StoreError>;

    /// Persist changes to an existing habit (name and lifecycle state)
    fn update_habit(&self, habit: &Habit) -> Result<(), StoreError>;

    /// Remove a habit and every completion recorded for it
    fn delete_habit(&self, habit_id: &HabitId) -> Result<(), StoreError>;

    /// List all habits, oldest first
    fn list_habits(&self) -> Result<Vec<Habit>, StoreError>;

    /// Every completion record in the store
    fn list_completions(&self) -> Result<Vec<Completion>, StoreError>;

    /// Completion records for a single day
    fn completions_for_date(&self, date: NaiveDate) -> Result<Vec<Completion>, StoreError>;

    /// The completion record for a habit on a day, if one exists
    fn get_completion(
        &self,
        habit_id: &HabitId,
        date: NaiveDate,
    ) -> Result<Option<Completion>, StoreError>;

    /// Insert or replace a completion record
    fn upsert_completion(&self, completion: &Completion) -> Result<(), StoreError>;

    /// Flip the completion state for a habit on a day
    ///
    /// A first toggle on a day with no record creates one marked done.
    /// Further toggles flip the existing record in place, keeping its ID.
    /// Returns the state the record ends up in.
    fn toggle_completion(&self, habit_id: &HabitId, date: NaiveDate) -> Result<bool, StoreError> {
        let record = match self.get_completion(habit_id, date)? {
            Some(mut existing) => {
                existing.completed = !existing.completed;
                existing
            }
            None => Completion::new(habit_id.clone(), date, true),
        };

        self.upsert_completion(&record)?;
        Ok(record.completed)
    }
}
