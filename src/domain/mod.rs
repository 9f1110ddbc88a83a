/// Domain module containing core business logic and data types
///
/// This module defines the core entities (Habit, Completion) and the streak
/// math over them. These types represent the fundamental concepts in our
/// habit journal.

pub mod completion;
pub mod habit;
pub mod streak;
pub mod types;

// Re-export public types for easy access
pub use completion::*;
pub use habit::*;
pub use streak::*;
pub use types::*;

use thiserror::Error;

/// Errors that can occur during domain operations
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid habit name: {0}")]
    InvalidHabitName(String),

    #[error("Invalid habit id: {0}")]
    InvalidHabitId(String),

    #[error("Invalid date format: {0}")]
    InvalidDateFormat(String),

    #[error("A habit named '{0}' already exists")]
    DuplicateHabitName(String),
}
