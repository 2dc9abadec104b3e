/// Storage layer for persisting tracker data
///
/// This module handles all database operations using SQLite. It owns the
/// three tables (daily logs, workouts, settings); no other part of the crate
/// talks to the database directly.

pub mod sqlite;
pub mod migrations;
pub mod encoding;

// Re-export the main storage types
pub use sqlite::*;

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::{DailyLog, WorkoutId, WorkoutLog, WorkoutSet};

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    /// The database could not be opened or its schema could not be created
    #[error("Storage initialization failed: {0}")]
    Init(String),

    /// An insert, update or delete failed; nothing was committed
    #[error("Failed to {operation}: {source}")]
    Write {
        operation: &'static str,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Database query error: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Workout not found: {id}")]
    WorkoutNotFound { id: WorkoutId },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl StorageError {
    /// Wrap an engine error raised while writing
    pub(crate) fn write(operation: &'static str) -> impl FnOnce(rusqlite::Error) -> Self {
        move |source| StorageError::Write { operation, source }
    }
}

/// Trait defining the storage interface for the tracker
///
/// Every read goes back to the database; implementations must not cache
/// rows between calls.
pub trait TrackerStorage {
    /// Create any missing tables and apply best-effort column migrations
    fn initialize(&self) -> Result<(), StorageError>;

    /// Insert the log for `log.date`, replacing any existing one
    fn upsert_daily_log(&self, log: &DailyLog) -> Result<(), StorageError>;

    /// Update the log for `log.date` in place
    ///
    /// Returns `false` and changes nothing if no log exists for that date.
    fn update_daily_log(&self, log: &DailyLog) -> Result<bool, StorageError>;

    /// Get the log for a single date
    fn get_daily_log(&self, date: NaiveDate) -> Result<Option<DailyLog>, StorageError>;

    /// Get every daily log, oldest first
    fn get_all_daily_logs(&self) -> Result<Vec<DailyLog>, StorageError>;

    /// Get every logged date, oldest first
    fn get_logged_dates(&self) -> Result<Vec<NaiveDate>, StorageError>;

    /// Delete the log for a date; deleting a missing log is not an error
    fn delete_daily_log(&self, date: NaiveDate) -> Result<(), StorageError>;

    /// Insert a new workout log and return its assigned ID
    fn add_workout(
        &self,
        date: NaiveDate,
        exercise: &str,
        sets: &[WorkoutSet],
    ) -> Result<WorkoutId, StorageError>;

    /// Replace the sets of an existing workout log
    fn update_workout(&self, id: WorkoutId, sets: &[WorkoutSet]) -> Result<(), StorageError>;

    /// Delete a workout log; deleting a missing one is not an error
    fn delete_workout(&self, id: WorkoutId) -> Result<(), StorageError>;

    /// Get a single workout log by ID
    fn get_workout(&self, id: WorkoutId) -> Result<Option<WorkoutLog>, StorageError>;

    /// Get all workout logs for a date, in the order they were logged
    fn get_workouts_for_date(&self, date: NaiveDate) -> Result<Vec<WorkoutLog>, StorageError>;

    /// Get every workout log, oldest date first
    fn get_all_workouts(&self) -> Result<Vec<WorkoutLog>, StorageError>;

    /// Get every distinct, non-empty exercise name ever logged, sorted
    fn get_unique_exercise_names(&self) -> Result<Vec<String>, StorageError>;

    /// Get a setting value, or `None` if it was never saved
    fn get_setting(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Insert or replace a setting value
    fn save_setting(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
