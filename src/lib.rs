/// Public library interface for the LockedIn tracker
///
/// This module exports the store, the streak evaluator, the photo helper and
/// the use-case operations that a front end (the bundled CLI, or any other
/// presentation layer) drives.

use thiserror::Error;

// Internal modules
mod domain;
mod storage;
mod analytics;
mod photos;
mod config;
pub mod tools;

// Re-export public modules and types
pub use domain::*;
pub use storage::{SqliteStorage, StorageError, TrackerStorage};
pub use analytics::{
    body_series, consistency_grid, exercise_progression, goal_progress, group_workouts_by_date,
    metric_series, GoalProgress, GridDay, Metric, SeriesPoint, WorkoutDay, DEFAULT_GRID_DAYS,
};
pub use photos::{FsPhotoStore, PhotoError, PhotoStore, PHOTO_SUBDIR};
pub use config::{AppPaths, DATABASE_FILE};

/// Errors that can occur while running tracker operations
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Database error: {0}")]
    Database(#[from] storage::StorageError),

    #[error("Domain validation error: {0}")]
    Domain(#[from] domain::DomainError),

    #[error("Photo error: {0}")]
    Photo(#[from] photos::PhotoError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// The tracker's long-lived state: one store and one photo directory
///
/// Created once at startup and borrowed by every operation, so there is never
/// more than one connection to the database in the process.
pub struct LockedIn {
    storage: SqliteStorage,
    photos: FsPhotoStore,
}

impl LockedIn {
    /// Open the tracker at the given paths
    ///
    /// This initializes the SQLite schema if it doesn't already exist and
    /// prepares the photo directory.
    pub async fn open(paths: &AppPaths) -> Result<Self, TrackerError> {
        tracing::info!("Opening LockedIn with database: {:?}", paths.database);

        tokio::fs::create_dir_all(&paths.photo_dir).await?;
        let storage = SqliteStorage::open(&paths.database)?;
        let photos = FsPhotoStore::new(&paths.photo_dir);

        let days_logged = storage.get_logged_dates()?.len();
        tracing::info!("Tracker ready, found {} logged days", days_logged);

        Ok(Self { storage, photos })
    }

    /// Get a reference to the storage layer
    pub fn storage(&self) -> &SqliteStorage {
        &self.storage
    }

    /// Get a reference to the photo store
    pub fn photos(&self) -> &FsPhotoStore {
        &self.photos
    }
}
