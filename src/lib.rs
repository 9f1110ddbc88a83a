/// Habit Journal MCP library crate
///
/// The binary is a thin wrapper around this crate: everything from the
/// domain types to the MCP loop lives here so tests can drive the whole
/// stack without spawning a process.

use std::path::PathBuf;
use thiserror::Error;

mod domain;
mod storage;
mod analytics;
mod tools;
mod mcp;

// The test suites and embedding applications reach everything through these
pub use domain::*;
pub use analytics::*;
pub use storage::{HabitStore, SqliteStore, StoreError};
pub use tools::*;

/// Top-level failures while bringing the server up or running it
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Database error: {0}")]
    Database(#[from] storage::StoreError),

    #[error("Domain validation error: {0}")]
    Domain(#[from] domain::DomainError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// The habit journal behind the MCP surface
///
/// Owns the SQLite store; the MCP layer borrows it per tool call. Habit
/// data, streaks, monthly statistics and the calendar all come out of the
/// one database file given at construction.
pub struct HabitJournalServer {
    store: SqliteStore,
}

impl HabitJournalServer {
    /// Open (and if needed create) the database and prepare the server
    pub async fn new(db_path: PathBuf) -> Result<Self, ServerError> {
        tracing::info!("Initializing Habit Journal server with database: {:?}", db_path);

        let store = SqliteStore::new(db_path)?;

        Ok(Self { store })
    }

    /// Serve MCP requests over stdin/stdout until the client disconnects
    pub async fn run(self) -> Result<(), ServerError> {
        tracing::info!("Starting MCP server...");

        // A quick read proves the database is usable before we accept requests
        let habits = self.store.list_habits()?;
        tracing::info!("Server started successfully, found {} existing habits", habits.len());

        let mut mcp_server = mcp::McpServer::new(self);
        mcp_server.run().await?;

        Ok(())
    }

    /// Direct access to the store, used by the tool dispatch and tests
    pub fn store(&self) -> &SqliteStore {
        &self.store
    }
}
