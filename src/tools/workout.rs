/// Logging, editing and listing workouts

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{
    logged_sets, merge_exercise_names, normalize_exercise_name, parse_log_date, DomainError,
    WorkoutId, WorkoutLog, WorkoutSet,
};
use crate::storage::TrackerStorage;
use crate::TrackerError;

/// Parameters for logging or editing a workout
#[derive(Debug, Default, Deserialize)]
pub struct SaveWorkoutParams {
    /// Set when editing an existing workout; only its sets are replaced
    pub id: Option<i64>,
    /// Date to log, defaults to today (ignored when editing)
    pub date: Option<String>,
    /// Exercise name (required when logging a new workout)
    pub exercise: Option<String>,
    /// Sets as entered, blank rows included
    #[serde(default)]
    pub sets: Vec<WorkoutSet>,
}

/// Response from saving a workout
#[derive(Debug, Serialize)]
pub struct SaveWorkoutResponse {
    pub success: bool,
    pub message: String,
    pub id: WorkoutId,
    pub sets: Vec<WorkoutSet>,
}

/// Drop blank sets, then add a new workout or replace an existing one's sets
pub fn save_workout<S: TrackerStorage>(
    storage: &S,
    params: SaveWorkoutParams,
    today: NaiveDate,
) -> Result<SaveWorkoutResponse, TrackerError> {
    let sets = logged_sets(&params.sets)?;

    if let Some(raw_id) = params.id {
        let id = WorkoutId(raw_id);
        storage.update_workout(id, &sets)?;
        return Ok(SaveWorkoutResponse {
            success: true,
            message: format!("Updated workout {} ({} sets)", id, sets.len()),
            id,
            sets,
        });
    }

    let exercise = match params.exercise.as_deref() {
        Some(name) => normalize_exercise_name(name)?,
        None => {
            return Err(DomainError::InvalidExerciseName("Pick an exercise".to_string()).into())
        }
    };
    let date = match params.date.as_deref() {
        Some(s) => parse_log_date(s)?,
        None => today,
    };

    let id = storage.add_workout(date, &exercise, &sets)?;
    Ok(SaveWorkoutResponse {
        success: true,
        message: format!("Logged {} ({} sets)", exercise, sets.len()),
        id,
        sets,
    })
}

/// Delete a workout by ID; a missing workout is not an error
pub fn delete_workout<S: TrackerStorage>(storage: &S, id: i64) -> Result<(), TrackerError> {
    storage.delete_workout(WorkoutId(id))?;
    Ok(())
}

/// Workouts for one date, defaulting to today
pub fn list_workouts<S: TrackerStorage>(
    storage: &S,
    date: Option<&str>,
    today: NaiveDate,
) -> Result<Vec<WorkoutLog>, TrackerError> {
    let date = match date {
        Some(s) => parse_log_date(s)?,
        None => today,
    };
    Ok(storage.get_workouts_for_date(date)?)
}

/// Exercises to offer: the built-in list plus everything ever logged
pub fn exercise_catalog<S: TrackerStorage>(storage: &S) -> Result<Vec<String>, TrackerError> {
    let history = storage.get_unique_exercise_names()?;
    Ok(merge_exercise_names(history))
}
