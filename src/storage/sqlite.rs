/// SQLite implementation of the tracker storage interface
///
/// This module provides the concrete SQLite implementation for storing and
/// retrieving daily logs, workouts and settings. Every row is decoded into
/// its domain type right here, so untyped values never leave this module.

use std::path::Path;

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::domain::{DailyLog, WorkoutId, WorkoutLog, WorkoutSet};
use crate::storage::encoding::{decode_photos, decode_sets, encode_list};
use crate::storage::{migrations, StorageError, TrackerStorage};

const DAILY_LOG_COLUMNS: &str = "date, weight, bodyFat, muscleMass, photos";
const WORKOUT_COLUMNS: &str = "id, date, exercise, sets";

/// SQLite-based storage implementation
///
/// Holds the single connection to the database file. One instance is created
/// at startup and shared by reference, which gives read-after-write
/// consistency for every caller in the process.
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Open (or create) the database file and make sure the schema exists
    pub fn open<P: AsRef<Path>>(db_path: P) -> Result<Self, StorageError> {
        let db_path = db_path.as_ref();
        let conn = Connection::open(db_path)
            .map_err(|e| StorageError::Init(format!("Failed to open database: {}", e)))?;

        let storage = Self { conn };
        storage.initialize()?;

        tracing::info!("SQLite storage initialized at: {:?}", db_path);
        Ok(storage)
    }

    /// Open a private in-memory database (used by tests and dry runs)
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StorageError::Init(format!("Failed to open in-memory database: {}", e)))?;

        let storage = Self { conn };
        storage.initialize()?;
        Ok(storage)
    }

    fn daily_log_from_row(row: &Row<'_>) -> rusqlite::Result<DailyLog> {
        let photos: Option<String> = row.get(4)?;
        Ok(DailyLog::from_existing(
            row.get(0)?,
            row.get::<_, Option<f64>>(1)?.unwrap_or(0.0), // weight
            row.get::<_, Option<f64>>(2)?.unwrap_or(0.0), // bodyFat
            row.get::<_, Option<f64>>(3)?.unwrap_or(0.0), // muscleMass
            decode_photos(photos.as_deref()),
        ))
    }

    fn workout_from_row(row: &Row<'_>) -> rusqlite::Result<WorkoutLog> {
        let sets: Option<String> = row.get(3)?;
        Ok(WorkoutLog::from_existing(
            WorkoutId(row.get(0)?),
            row.get(1)?,
            row.get::<_, Option<String>>(2)?.unwrap_or_default(),
            decode_sets(sets.as_deref()),
        ))
    }

    fn query_workouts(
        &self,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> Result<Vec<WorkoutLog>, StorageError> {
        let mut stmt = self.conn.prepare(sql)?;
        let workout_iter = stmt.query_map(params, Self::workout_from_row)?;

        let mut workouts = Vec::new();
        for workout in workout_iter {
            workouts.push(workout?);
        }
        Ok(workouts)
    }

    fn require_sets(sets: &[WorkoutSet]) -> Result<(), StorageError> {
        if sets.is_empty() {
            return Err(StorageError::InvalidInput(
                "A workout needs at least one set".to_string(),
            ));
        }
        Ok(())
    }

    fn require_key(key: &str) -> Result<(), StorageError> {
        if key.trim().is_empty() {
            return Err(StorageError::InvalidInput("Setting key cannot be empty".to_string()));
        }
        Ok(())
    }
}

impl TrackerStorage for SqliteStorage {
    fn initialize(&self) -> Result<(), StorageError> {
        migrations::initialize_database(&self.conn)
    }

    fn upsert_daily_log(&self, log: &DailyLog) -> Result<(), StorageError> {
        let photos_json = encode_list(&log.photos)?;

        self.conn
            .execute(
                "INSERT OR REPLACE INTO daily_logs (date, weight, bodyFat, muscleMass, photos)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![log.date, log.weight, log.body_fat, log.muscle_mass, photos_json],
            )
            .map_err(StorageError::write("save daily log"))?;

        tracing::debug!("Saved daily log for {}", log.date);
        Ok(())
    }

    fn update_daily_log(&self, log: &DailyLog) -> Result<bool, StorageError> {
        let photos_json = encode_list(&log.photos)?;

        let rows_affected = self
            .conn
            .execute(
                "UPDATE daily_logs SET weight = ?2, bodyFat = ?3, muscleMass = ?4, photos = ?5
                 WHERE date = ?1",
                params![log.date, log.weight, log.body_fat, log.muscle_mass, photos_json],
            )
            .map_err(StorageError::write("update daily log"))?;

        if rows_affected == 0 {
            tracing::debug!("No daily log for {}, nothing updated", log.date);
            return Ok(false);
        }

        tracing::debug!("Updated daily log for {}", log.date);
        Ok(true)
    }

    fn get_daily_log(&self, date: NaiveDate) -> Result<Option<DailyLog>, StorageError> {
        let sql = format!("SELECT {} FROM daily_logs WHERE date = ?1", DAILY_LOG_COLUMNS);
        let log = self
            .conn
            .query_row(&sql, params![date], Self::daily_log_from_row)
            .optional()?;
        Ok(log)
    }

    fn get_all_daily_logs(&self) -> Result<Vec<DailyLog>, StorageError> {
        let sql = format!("SELECT {} FROM daily_logs ORDER BY date ASC", DAILY_LOG_COLUMNS);
        let mut stmt = self.conn.prepare(&sql)?;
        let log_iter = stmt.query_map([], Self::daily_log_from_row)?;

        let mut logs = Vec::new();
        for log in log_iter {
            logs.push(log?);
        }
        Ok(logs)
    }

    fn get_logged_dates(&self) -> Result<Vec<NaiveDate>, StorageError> {
        let mut stmt = self.conn.prepare("SELECT date FROM daily_logs ORDER BY date ASC")?;
        let date_iter = stmt.query_map([], |row| row.get::<_, NaiveDate>(0))?;

        let mut dates = Vec::new();
        for date in date_iter {
            dates.push(date?);
        }
        Ok(dates)
    }

    fn delete_daily_log(&self, date: NaiveDate) -> Result<(), StorageError> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM daily_logs WHERE date = ?1", params![date])
            .map_err(StorageError::write("delete daily log"))?;

        tracing::debug!("Deleted daily log for {} ({} rows)", date, rows_affected);
        Ok(())
    }

    fn add_workout(
        &self,
        date: NaiveDate,
        exercise: &str,
        sets: &[WorkoutSet],
    ) -> Result<WorkoutId, StorageError> {
        Self::require_sets(sets)?;
        let exercise = exercise.trim();
        if exercise.is_empty() {
            return Err(StorageError::InvalidInput("Exercise name cannot be empty".to_string()));
        }
        let sets_json = encode_list(sets)?;

        self.conn
            .execute(
                "INSERT INTO workouts (date, exercise, sets) VALUES (?1, ?2, ?3)",
                params![date, exercise, sets_json],
            )
            .map_err(StorageError::write("add workout"))?;

        let id = WorkoutId(self.conn.last_insert_rowid());
        tracing::debug!("Added workout {}: {} on {}", id, exercise, date);
        Ok(id)
    }

    fn update_workout(&self, id: WorkoutId, sets: &[WorkoutSet]) -> Result<(), StorageError> {
        Self::require_sets(sets)?;
        let sets_json = encode_list(sets)?;

        let rows_affected = self
            .conn
            .execute(
                "UPDATE workouts SET sets = ?2 WHERE id = ?1",
                params![id.value(), sets_json],
            )
            .map_err(StorageError::write("update workout"))?;

        if rows_affected == 0 {
            return Err(StorageError::WorkoutNotFound { id });
        }

        tracing::debug!("Updated workout {}", id);
        Ok(())
    }

    fn delete_workout(&self, id: WorkoutId) -> Result<(), StorageError> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM workouts WHERE id = ?1", params![id.value()])
            .map_err(StorageError::write("delete workout"))?;

        tracing::debug!("Deleted workout {} ({} rows)", id, rows_affected);
        Ok(())
    }

    fn get_workout(&self, id: WorkoutId) -> Result<Option<WorkoutLog>, StorageError> {
        let sql = format!("SELECT {} FROM workouts WHERE id = ?1", WORKOUT_COLUMNS);
        let workout = self
            .conn
            .query_row(&sql, params![id.value()], Self::workout_from_row)
            .optional()?;
        Ok(workout)
    }

    fn get_workouts_for_date(&self, date: NaiveDate) -> Result<Vec<WorkoutLog>, StorageError> {
        let sql = format!("SELECT {} FROM workouts WHERE date = ?1 ORDER BY id ASC", WORKOUT_COLUMNS);
        self.query_workouts(&sql, params![date])
    }

    fn get_all_workouts(&self) -> Result<Vec<WorkoutLog>, StorageError> {
        let sql = format!("SELECT {} FROM workouts ORDER BY date ASC, id ASC", WORKOUT_COLUMNS);
        self.query_workouts(&sql, params![])
    }

    fn get_unique_exercise_names(&self) -> Result<Vec<String>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT DISTINCT TRIM(exercise) AS name FROM workouts
             WHERE exercise IS NOT NULL AND TRIM(exercise) != ''
             ORDER BY name ASC",
        )?;
        let name_iter = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut names = Vec::new();
        for name in name_iter {
            names.push(name?);
        }
        Ok(names)
    }

    fn get_setting(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::require_key(key)?;
        let value = self
            .conn
            .query_row(
                "SELECT value FROM settings WHERE key = ?1",
                params![key],
                |row| row.get::<_, Option<String>>(0),
            )
            .optional()?;
        Ok(value.flatten())
    }

    fn save_setting(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::require_key(key)?;
        self.conn
            .execute(
                "INSERT OR REPLACE INTO settings (key, value) VALUES (?1, ?2)",
                params![key, value],
            )
            .map_err(StorageError::write("save setting"))?;

        tracing::debug!("Saved setting: {}", key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn storage() -> SqliteStorage {
        SqliteStorage::open_in_memory().unwrap()
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
    }

    fn log(day: u32, weight: f64) -> DailyLog {
        DailyLog::new(date(day), weight, 20.0, 35.0, vec![]).unwrap()
    }

    #[test]
    fn test_upsert_replaces_by_date() {
        let storage = storage();
        storage.upsert_daily_log(&log(1, 80.0)).unwrap();
        storage.upsert_daily_log(&log(1, 79.4)).unwrap();

        let logs = storage.get_all_daily_logs().unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].weight, 79.4);
    }

    #[test]
    fn test_update_missing_log_is_noop() {
        let storage = storage();
        assert!(!storage.update_daily_log(&log(3, 80.0)).unwrap());
        assert!(storage.get_all_daily_logs().unwrap().is_empty());

        storage.upsert_daily_log(&log(3, 80.0)).unwrap();
        assert!(storage.update_daily_log(&log(3, 81.0)).unwrap());
        assert_eq!(storage.get_daily_log(date(3)).unwrap().unwrap().weight, 81.0);
    }

    #[test]
    fn test_logs_and_dates_sorted_ascending() {
        let storage = storage();
        storage.upsert_daily_log(&log(9, 80.0)).unwrap();
        storage.upsert_daily_log(&log(2, 81.0)).unwrap();
        storage.upsert_daily_log(&log(5, 80.5)).unwrap();

        let dates = storage.get_logged_dates().unwrap();
        assert_eq!(dates, vec![date(2), date(5), date(9)]);
        let logs = storage.get_all_daily_logs().unwrap();
        assert_eq!(logs.first().unwrap().date, date(2));
    }

    #[test]
    fn test_photos_round_trip_in_order() {
        let storage = storage();
        let photos = vec!["logs/c.jpg".to_string(), "logs/a.jpg".to_string(), "logs/b.jpg".to_string()];
        let entry = DailyLog::new(date(4), 80.0, 20.0, 35.0, photos.clone()).unwrap();
        storage.upsert_daily_log(&entry).unwrap();

        assert_eq!(storage.get_daily_log(date(4)).unwrap().unwrap().photos, photos);
    }

    #[test]
    fn test_malformed_photos_and_null_metrics_degrade() {
        let storage = storage();
        storage
            .conn
            .execute(
                "INSERT INTO daily_logs (date, weight, bodyFat, muscleMass, photos)
                 VALUES ('2024-06-07', 82.0, NULL, NULL, 'not json')",
                [],
            )
            .unwrap();

        let loaded = storage.get_daily_log(date(7)).unwrap().unwrap();
        assert_eq!(loaded.weight, 82.0);
        assert_eq!(loaded.body_fat, 0.0);
        assert_eq!(loaded.muscle_mass, 0.0);
        assert!(loaded.photos.is_empty());
    }

    #[test]
    fn test_malformed_date_is_a_query_error() {
        let storage = storage();
        storage
            .conn
            .execute("INSERT INTO daily_logs (date, weight) VALUES ('yesterday', 80.0)", [])
            .unwrap();

        assert!(matches!(storage.get_all_daily_logs(), Err(StorageError::Query(_))));
    }

    #[test]
    fn test_delete_missing_rows_is_ok() {
        let storage = storage();
        storage.upsert_daily_log(&log(1, 80.0)).unwrap();

        storage.delete_daily_log(date(2)).unwrap();
        storage.delete_workout(WorkoutId(999)).unwrap();
        assert_eq!(storage.get_all_daily_logs().unwrap().len(), 1);

        storage.delete_daily_log(date(1)).unwrap();
        assert!(storage.get_all_daily_logs().unwrap().is_empty());
    }

    #[test]
    fn test_add_and_fetch_workout() {
        let storage = storage();
        let sets = vec![WorkoutSet::new(100.0, 5), WorkoutSet::new(105.0, 3)];
        let id = storage.add_workout(date(1), "Squat", &sets).unwrap();

        let workouts = storage.get_workouts_for_date(date(1)).unwrap();
        assert_eq!(workouts.len(), 1);
        assert_eq!(workouts[0].id, id);
        assert_eq!(workouts[0].sets, sets);
        assert!(storage.get_workouts_for_date(date(2)).unwrap().is_empty());
    }

    #[test]
    fn test_workout_ids_increase() {
        let storage = storage();
        let first = storage.add_workout(date(1), "Squat", &[WorkoutSet::new(100.0, 5)]).unwrap();
        let second = storage.add_workout(date(1), "Bench Press", &[WorkoutSet::new(70.0, 8)]).unwrap();
        assert!(second > first);
    }

    #[test]
    fn test_update_workout_replaces_sets() {
        let storage = storage();
        let id = storage.add_workout(date(1), "Deadlift", &[WorkoutSet::new(140.0, 5)]).unwrap();
        let new_sets = vec![WorkoutSet::new(150.0, 3)];
        storage.update_workout(id, &new_sets).unwrap();

        assert_eq!(storage.get_workout(id).unwrap().unwrap().sets, new_sets);
    }

    #[test]
    fn test_update_missing_workout_fails() {
        let storage = storage();
        let result = storage.update_workout(WorkoutId(42), &[WorkoutSet::new(10.0, 10)]);
        assert!(matches!(result, Err(StorageError::WorkoutNotFound { id: WorkoutId(42) })));
    }

    #[test]
    fn test_empty_sets_rejected() {
        let storage = storage();
        assert!(matches!(
            storage.add_workout(date(1), "Squat", &[]),
            Err(StorageError::InvalidInput(_))
        ));
        assert!(storage.get_all_workouts().unwrap().is_empty());
    }

    #[test]
    fn test_all_workouts_sorted_by_date() {
        let storage = storage();
        storage.add_workout(date(5), "Squat", &[WorkoutSet::new(100.0, 5)]).unwrap();
        storage.add_workout(date(2), "Squat", &[WorkoutSet::new(95.0, 5)]).unwrap();

        let dates: Vec<NaiveDate> = storage.get_all_workouts().unwrap().iter().map(|w| w.date).collect();
        assert_eq!(dates, vec![date(2), date(5)]);
    }

    #[test]
    fn test_unique_exercise_names() {
        let storage = storage();
        let set = [WorkoutSet::new(20.0, 10)];
        storage.add_workout(date(1), "Squat", &set).unwrap();
        storage.add_workout(date(2), "Squat", &set).unwrap();
        storage.add_workout(date(2), "Cable Fly", &set).unwrap();
        storage
            .conn
            .execute("INSERT INTO workouts (date, exercise, sets) VALUES ('2024-06-03', '', '[]')", [])
            .unwrap();

        assert_eq!(storage.get_unique_exercise_names().unwrap(), vec!["Cable Fly", "Squat"]);
    }

    #[test]
    fn test_unique_exercise_names_ignore_padding() {
        let storage = storage();
        storage.add_workout(date(1), "Squat", &[WorkoutSet::new(100.0, 5)]).unwrap();
        storage
            .conn
            .execute(
                "INSERT INTO workouts (date, exercise, sets) VALUES ('2024-06-02', ' Squat ', '[]')",
                [],
            )
            .unwrap();

        assert_eq!(storage.get_unique_exercise_names().unwrap(), vec!["Squat"]);
    }

    #[test]
    fn test_malformed_sets_degrade() {
        let storage = storage();
        storage
            .conn
            .execute(
                "INSERT INTO workouts (date, exercise, sets) VALUES ('2024-06-03', 'Squat', '[{broken')",
                [],
            )
            .unwrap();

        let workouts = storage.get_workouts_for_date(date(3)).unwrap();
        assert_eq!(workouts.len(), 1);
        assert!(workouts[0].sets.is_empty());
    }

    #[test]
    fn test_settings_upsert() {
        let storage = storage();
        assert_eq!(storage.get_setting("target_weight").unwrap(), None);

        storage.save_setting("target_weight", "75").unwrap();
        storage.save_setting("target_weight", "72.5").unwrap();
        assert_eq!(storage.get_setting("target_weight").unwrap().as_deref(), Some("72.5"));

        assert!(matches!(storage.save_setting("  ", "x"), Err(StorageError::InvalidInput(_))));
    }
}
