/// MCP tools for the habit journal
///
/// This module contains all the MCP tools that external clients (like Claude)
/// can call to manage habits and read their statistics.

pub mod add;
pub mod toggle;
pub mod today;
pub mod list;
pub mod stats;
pub mod calendar;
pub mod manage;

// Re-export tool functions for easy access
pub use add::*;
pub use toggle::*;
pub use today::*;
pub use list::*;
pub use stats::*;
pub use calendar::*;
pub use manage::*;

use chrono::NaiveDate;
use thiserror::Error;
use crate::domain::{DomainError, HabitId};
use crate::storage::StoreError;

/// Errors a tool call can produce
///
/// A call fails either because the input did not validate or because the
/// store could not do its part; both keep their own error's message.
#[derive(Error, Debug)]
pub enum ToolError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Parse a YYYY-MM-DD date argument
///
/// A malformed date fails the whole call instead of being silently
/// replaced with today, so a client typo never writes to the wrong day.
pub(crate) fn parse_date_arg(s: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| DomainError::InvalidDateFormat(format!("Expected YYYY-MM-DD, got '{}'", s)))
}

/// Parse a YYYY-MM month argument to the first day of that month
pub(crate) fn parse_month_arg(s: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
        .map_err(|_| DomainError::InvalidDateFormat(format!("Expected YYYY-MM, got '{}'", s)))
}

/// Parse a habit ID argument
pub(crate) fn parse_habit_id(s: &str) -> Result<HabitId, DomainError> {
    HabitId::from_string(s).map_err(|_| DomainError::InvalidHabitId(s.to_string()))
}
