/// Database schema setup
///
/// This module creates the tables the tracker needs. Schema creation is
/// idempotent, and column additions for databases written by older builds
/// are attempted on every start and tolerated when they are already applied.
/// There is no version table.

use rusqlite::Connection;

use crate::storage::StorageError;

/// Columns added after the first release, as (table, column, definition)
const ADDED_COLUMNS: &[(&str, &str, &str)] = &[("daily_logs", "photos", "TEXT")];

/// Initialize the database schema
///
/// Creates all required tables and indexes if they don't exist, then applies
/// best-effort column migrations.
pub fn initialize_database(conn: &Connection) -> Result<(), StorageError> {
    create_tables(conn).map_err(|e| StorageError::Init(format!("Failed to create schema: {}", e)))?;
    add_missing_columns(conn);
    Ok(())
}

fn create_tables(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS daily_logs (
            date TEXT PRIMARY KEY NOT NULL,
            weight REAL,
            bodyFat REAL,
            muscleMass REAL,
            photos TEXT
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS workouts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            date TEXT,
            exercise TEXT,
            sets TEXT
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS settings (
            key TEXT PRIMARY KEY NOT NULL,
            value TEXT
        )",
        [],
    )?;

    // Index for the per-day workout list (most common workout query)
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_workouts_date ON workouts (date)",
        [],
    )?;

    tracing::info!("Database schema ready");
    Ok(())
}

/// Try to add each later column; a failure means it is already there
fn add_missing_columns(conn: &Connection) {
    for (table, column, definition) in ADDED_COLUMNS {
        let sql = format!("ALTER TABLE {} ADD COLUMN {} {}", table, column, definition);
        match conn.execute(&sql, []) {
            Ok(_) => tracing::info!("Added column {}.{}", table, column),
            Err(e) => tracing::debug!("Skipped adding column {}.{}: {}", table, column, e),
        }
    }
}
