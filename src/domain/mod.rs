/// Domain module containing core business logic and data types
///
/// This module defines the core entities (DailyLog, WorkoutLog) and the
/// streak/day-state evaluation over logged dates. Nothing in here touches
/// storage; the storage layer hands fully decoded rows to these types.

pub mod daily_log;
pub mod workout;
pub mod streak;
pub mod types;

// Re-export public types for easy access
pub use daily_log::*;
pub use workout::*;
pub use streak::*;
pub use types::*;

use thiserror::Error;

/// Errors that can occur during domain operations
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Invalid exercise name: {0}")]
    InvalidExerciseName(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid value: {message}")]
    InvalidValue { message: String },

    #[error("Too many photos: {count} (max {max} per day)")]
    TooManyPhotos { count: usize, max: usize },
}
