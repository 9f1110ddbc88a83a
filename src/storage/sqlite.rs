/// SQLite implementation of the habit storage interface
///
/// This module provides the concrete SQLite implementation for storing
/// and retrieving habit data. It handles all SQL queries and data conversion.

use std::path::PathBuf;
use rusqlite::{Connection, params};
use chrono::NaiveDate;

use crate::domain::{Completion, CompletionId, Habit, HabitId};
use crate::storage::{StoreError, HabitStore, migrations};

/// SQLite-based storage implementation
///
/// This struct holds a connection to the SQLite database and implements
/// all the storage operations defined in the HabitStore trait.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Create a new SQLite store instance
    ///
    /// This opens the database file and runs any necessary migrations
    /// to ensure the schema is up to date.
    pub fn new(db_path: PathBuf) -> Result<Self, StoreError> {
        // Open the SQLite database
        let conn = Connection::open(&db_path)
            .map_err(|e| StoreError::Connection(format!("Failed to open database: {}", e)))?;

        // Enable foreign key constraints
        conn.execute("PRAGMA foreign_keys = ON", [])
            .map_err(|e| StoreError::Connection(format!("Failed to enable foreign keys: {}", e)))?;

        // Initialize/migrate the database schema
        migrations::initialize_database(&conn)?;

        tracing::info!("SQLite store initialized at: {:?}", db_path);

        Ok(Self { conn })
    }

    /// Helper method to rebuild a Habit from a database row
    ///
    /// Expects columns in the order: id, name, created_at, active, archived_at
    fn habit_from_row(row: &rusqlite::Row) -> rusqlite::Result<Habit> {
        let id_str: String = row.get(0)?;
        let id = HabitId::from_string(&id_str).map_err(|_| {
            rusqlite::Error::InvalidColumnType(0, "Invalid UUID".to_string(), rusqlite::types::Type::Text)
        })?;

        let created_at_str: String = row.get(2)?;
        let created_at = chrono::DateTime::parse_from_rfc3339(&created_at_str)
            .map_err(|_| {
                rusqlite::Error::InvalidColumnType(2, "Invalid datetime".to_string(), rusqlite::types::Type::Text)
            })?
            .with_timezone(&chrono::Utc);

        let archived_at_str: Option<String> = row.get(4)?;
        let archived_at = match archived_at_str {
            Some(s) => Some(
                chrono::DateTime::parse_from_rfc3339(&s)
                    .map_err(|_| {
                        rusqlite::Error::InvalidColumnType(4, "Invalid datetime".to_string(), rusqlite::types::Type::Text)
                    })?
                    .with_timezone(&chrono::Utc),
            ),
            None => None,
        };

        Ok(Habit::from_existing(
            id,
            row.get(1)?, // name
            created_at,
            row.get(3)?, // active
            archived_at,
        ))
    }

    /// Helper method to rebuild a Completion from a database row
    ///
    /// Expects columns in the order: id, habit_id, date, completed
    fn completion_from_row(row: &rusqlite::Row) -> rusqlite::Result<Completion> {
        let id_str: String = row.get(0)?;

        let habit_id_str: String = row.get(1)?;
        let habit_id = HabitId::from_string(&habit_id_str).map_err(|_| {
            rusqlite::Error::InvalidColumnType(1, "Invalid UUID".to_string(), rusqlite::types::Type::Text)
        })?;

        let date_str: String = row.get(2)?;
        let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|_| {
            rusqlite::Error::InvalidColumnType(2, "Invalid date".to_string(), rusqlite::types::Type::Text)
        })?;

        Ok(Completion::from_existing(
            CompletionId::from_string(&id_str),
            habit_id,
            date,
            row.get(3)?, // completed
        ))
    }
}

impl HabitStore for SqliteStore {
    /// Create a new habit in the database
    fn create_habit(&self, habit: &Habit) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO habits (id, name, created_at, active, archived_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                habit.id.to_string(),
                habit.name,
                habit.created_at.to_rfc3339(),
                habit.active,
                habit.archived_at.map(|at| at.to_rfc3339())
            ],
        )?;

        tracing::debug!("Created habit: {} ({})", habit.name, habit.id.to_string());
        Ok(())
    }

    /// Get a habit by its ID
    fn get_habit(&self, habit_id: &HabitId) -> Result<Habit, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, created_at, active, archived_at
             FROM habits WHERE id = ?1"
        )?;

        let result = stmt.query_row(params![habit_id.to_string()], Self::habit_from_row);

        match result {
            Ok(habit) => Ok(habit),
            Err(rusqlite::Error::QueryReturnedNoRows) => {
                Err(StoreError::HabitNotFound {
                    habit_id: habit_id.to_string(),
                })
            },
            Err(e) => Err(StoreError::Query(e)),
        }
    }

    /// Update an existing habit's name and lifecycle state
    fn update_habit(&self, habit: &Habit) -> Result<(), StoreError> {
        let rows_affected = self.conn.execute(
            "UPDATE habits SET
                name = ?2,
                active = ?3,
                archived_at = ?4
             WHERE id = ?1",
            params![
                habit.id.to_string(),
                habit.name,
                habit.active,
                habit.archived_at.map(|at| at.to_rfc3339())
            ],
        )?;

        if rows_affected == 0 {
            return Err(StoreError::HabitNotFound {
                habit_id: habit.id.to_string(),
            });
        }

        tracing::debug!("Updated habit: {} ({})", habit.name, habit.id.to_string());
        Ok(())
    }

    /// Permanently delete a habit together with its completion history
    fn delete_habit(&self, habit_id: &HabitId) -> Result<(), StoreError> {
        // Completions reference the habit, so both deletes happen in one
        // transaction. Dropping the transaction on an early return rolls
        // the completion delete back.
        let tx = self.conn.unchecked_transaction()?;

        tx.execute(
            "DELETE FROM completions WHERE habit_id = ?1",
            params![habit_id.to_string()],
        )?;

        let rows_affected = tx.execute(
            "DELETE FROM habits WHERE id = ?1",
            params![habit_id.to_string()],
        )?;

        if rows_affected == 0 {
            return Err(StoreError::HabitNotFound {
                habit_id: habit_id.to_string(),
            });
        }

        tx.commit()?;

        tracing::debug!("Deleted habit and its completions: {}", habit_id.to_string());
        Ok(())
    }

    /// List all habits, oldest first
    fn list_habits(&self) -> Result<Vec<Habit>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, created_at, active, archived_at
             FROM habits ORDER BY created_at ASC"
        )?;

        let habit_iter = stmt.query_map([], Self::habit_from_row)?;

        let mut habits = Vec::new();
        for habit in habit_iter {
            habits.push(habit?);
        }

        Ok(habits)
    }

    /// Every completion record in the store, ordered by day then habit
    fn list_completions(&self) -> Result<Vec<Completion>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, habit_id, date, completed
             FROM completions ORDER BY date ASC, habit_id ASC"
        )?;

        let completion_iter = stmt.query_map([], Self::completion_from_row)?;

        let mut completions = Vec::new();
        for completion in completion_iter {
            completions.push(completion?);
        }

        Ok(completions)
    }

    /// Completion records for a single day
    fn completions_for_date(&self, date: NaiveDate) -> Result<Vec<Completion>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, habit_id, date, completed
             FROM completions WHERE date = ?1 ORDER BY habit_id ASC"
        )?;

        let completion_iter = stmt.query_map(params![date.to_string()], Self::completion_from_row)?;

        let mut completions = Vec::new();
        for completion in completion_iter {
            completions.push(completion?);
        }

        Ok(completions)
    }

    /// The completion record for a habit on a day, if one exists
    fn get_completion(
        &self,
        habit_id: &HabitId,
        date: NaiveDate,
    ) -> Result<Option<Completion>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, habit_id, date, completed
             FROM completions WHERE habit_id = ?1 AND date = ?2"
        )?;

        let result = stmt.query_row(
            params![habit_id.to_string(), date.to_string()],
            Self::completion_from_row,
        );

        match result {
            Ok(completion) => Ok(Some(completion)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(StoreError::Query(e)),
        }
    }

    /// Insert or replace a completion record
    ///
    /// REPLACE also resolves conflicts on the unique (habit_id, date) index,
    /// so a legacy row with a differently shaped ID gets swapped out rather
    /// than duplicated.
    fn upsert_completion(&self, completion: &Completion) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO completions (id, habit_id, date, completed)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                completion.id.to_string(),
                completion.habit_id.to_string(),
                completion.date.to_string(),
                completion.completed
            ],
        )?;

        tracing::debug!(
            "Upserted completion: {} = {}",
            completion.id.to_string(),
            completion.completed
        );
        Ok(())
    }
}
