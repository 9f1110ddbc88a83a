/// Schema creation and versioned migrations
///
/// The database carries its schema version in a one-row table. On startup
/// the store compares that version against the latest known one and applies
/// whatever migrations are missing, so an old database file opened by a
/// newer build upgrades itself in place.

use rusqlite::Connection;
use crate::storage::StoreError;

/// Latest schema version; bump alongside each new migration
const CURRENT_VERSION: i32 = 1;

/// Bring the database schema up to the current version
pub fn initialize_database(conn: &Connection) -> Result<(), StoreError> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY
        )",
        [],
    )?;

    let current_version = get_current_version(conn)?;

    if current_version < CURRENT_VERSION {
        run_migrations(conn, current_version)?;
        set_version(conn, CURRENT_VERSION)?;
    }

    Ok(())
}

/// Read the stored schema version; a fresh database reads as version 0
fn get_current_version(conn: &Connection) -> Result<i32, StoreError> {
    let version = conn
        .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
            row.get::<_, i32>(0)
        })
        .unwrap_or(0);

    Ok(version)
}

/// Record the schema version after a successful migration run
fn set_version(conn: &Connection, version: i32) -> Result<(), StoreError> {
    conn.execute("DELETE FROM schema_version", [])?;
    conn.execute(
        "INSERT INTO schema_version (version) VALUES (?1)",
        [version],
    )?;
    Ok(())
}

/// Apply every migration newer than `from_version`, in order
fn run_migrations(conn: &Connection, from_version: i32) -> Result<(), StoreError> {
    if from_version < 1 {
        migration_v1(conn)?;
    }

    // Future migrations line up here:
    // if from_version < 2 {
    //     migration_v2(conn)?;
    // }

    Ok(())
}

/// Version 1: the habits table and their daily completion records
fn migration_v1(conn: &Connection) -> Result<(), StoreError> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS habits (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            created_at TEXT NOT NULL,
            active BOOLEAN DEFAULT TRUE,
            archived_at TEXT
        )",
        [],
    )?;

    // At most one row per habit per day; the unique index below enforces it
    conn.execute(
        "CREATE TABLE IF NOT EXISTS completions (
            id TEXT PRIMARY KEY,
            habit_id TEXT NOT NULL,
            date TEXT NOT NULL,
            completed BOOLEAN NOT NULL DEFAULT FALSE,
            FOREIGN KEY (habit_id) REFERENCES habits (id)
        )",
        [],
    )?;

    create_indexes_v1(conn)?;

    tracing::info!("Applied migration v1: created habits and completions tables");
    Ok(())
}

/// Indexes for version 1
fn create_indexes_v1(conn: &Connection) -> Result<(), StoreError> {
    // The one-record-per-habit-per-day rule
    conn.execute(
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_completions_habit_date
         ON completions (habit_id, date)",
        [],
    )?;

    // Day views load a whole date at once
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_completions_date
         ON completions (date)",
        [],
    )?;

    // The daily checklist filters on active
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_habits_active
         ON habits (active)",
        [],
    )?;

    tracing::info!("Created database indexes for v1");
    Ok(())
}
