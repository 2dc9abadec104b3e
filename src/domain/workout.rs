/// WorkoutLog entity for strength training entries
///
/// A WorkoutLog is one exercise logged on one day together with its sets.
/// A day can hold any number of workout logs; each gets a database-assigned
/// ID so it can be edited or deleted on its own.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, WorkoutId};

/// Exercises offered before the user has logged anything of their own
pub const DEFAULT_EXERCISES: &[&str] = &[
    "Bench Press",
    "Squat",
    "Deadlift",
    "Overhead Press",
    "Pull Up",
    "Dumbbell Row",
    "Bicep Curl",
    "Tricep Extension",
    "Leg Press",
    "Lat Pulldown",
    "Lateral Raise",
    "Face Pull",
    "Incline Dumbbell Press",
    "Hammer Curl",
    "Cable Fly",
];

/// A single set: load in kg and repetitions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSet {
    pub weight: f64,
    pub reps: u32,
}

impl WorkoutSet {
    pub fn new(weight: f64, reps: u32) -> Self {
        Self { weight, reps }
    }

    /// A set with neither load nor reps is a blank form row, not a real set
    pub fn is_blank(&self) -> bool {
        self.weight <= 0.0 && self.reps == 0
    }
}

/// One exercise logged on a given date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutLog {
    pub id: WorkoutId,
    pub date: NaiveDate,
    pub exercise: String,
    pub sets: Vec<WorkoutSet>,
}

impl WorkoutLog {
    /// Create a workout log from existing data (used when loading from database)
    pub fn from_existing(id: WorkoutId, date: NaiveDate, exercise: String, sets: Vec<WorkoutSet>) -> Self {
        Self {
            id,
            date,
            exercise,
            sets,
        }
    }

    /// Heaviest load across all sets, 0 if there are none
    pub fn top_set_weight(&self) -> f64 {
        self.sets.iter().map(|s| s.weight).fold(0.0, f64::max)
    }

    /// Total volume (load x reps) across all sets
    pub fn volume(&self) -> f64 {
        self.sets.iter().map(|s| s.weight * s.reps as f64).sum()
    }
}

/// Drop blank sets and make sure something is left to save
///
/// Returns the remaining sets in their original order.
pub fn logged_sets(sets: &[WorkoutSet]) -> Result<Vec<WorkoutSet>, DomainError> {
    if let Some(bad) = sets.iter().find(|s| !s.weight.is_finite() || s.weight < 0.0) {
        return Err(DomainError::InvalidValue {
            message: format!("Set weight must be a non-negative number, got {}", bad.weight),
        });
    }

    let kept: Vec<WorkoutSet> = sets.iter().copied().filter(|s| !s.is_blank()).collect();
    if kept.is_empty() {
        return Err(DomainError::Validation {
            message: "Enter at least one set with weight or reps".to_string(),
        });
    }
    Ok(kept)
}

/// Validate and normalize an exercise name
pub fn normalize_exercise_name(name: &str) -> Result<String, DomainError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidExerciseName(
            "Exercise name cannot be empty".to_string(),
        ));
    }
    if trimmed.len() > 100 {
        return Err(DomainError::InvalidExerciseName(
            "Exercise name cannot be longer than 100 characters".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

/// Merge the built-in exercise list with names from history
///
/// The result is sorted and free of duplicates.
pub fn merge_exercise_names<I, S>(history: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut names: Vec<String> = DEFAULT_EXERCISES.iter().map(|s| s.to_string()).collect();
    names.extend(history.into_iter().map(Into::into).filter(|n: &String| !n.trim().is_empty()));
    names.sort();
    names.dedup();
    names
}
