/// Core types used throughout the domain layer
///
/// This module defines the ID type for workouts, the single calendar-date
/// convention used by both the store and the streak evaluator, and the
/// well-known setting keys.

use std::fmt;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Format used for every stored and displayed log date
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Setting key holding the user's target body weight in kg
pub const TARGET_WEIGHT_KEY: &str = "target_weight";

/// Unique identifier for a workout log
///
/// Assigned by the database on insert and monotonically increasing. Wrapping
/// it keeps a raw row count or rep count from being passed where an ID is
/// expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WorkoutId(pub i64);

impl WorkoutId {
    /// Get the raw database value
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for WorkoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Today's date on the device's local calendar
///
/// All "today"/"yesterday" reasoning goes through this function so that the
/// dates written to the store and the dates the evaluator compares against
/// always come from the same clock and timezone.
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse a `YYYY-MM-DD` string as a calendar date
pub fn parse_log_date(s: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|_| DomainError::InvalidDate(format!("Expected YYYY-MM-DD, got '{}'", s)))
}

/// Render a calendar date as `YYYY-MM-DD`
pub fn format_log_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_format_date() {
        let date = parse_log_date("2024-03-09").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());
        assert_eq!(format_log_date(date), "2024-03-09");
    }

    #[test]
    fn test_parse_rejects_timestamps() {
        assert!(parse_log_date("2024-03-09T23:30:00Z").is_err());
        assert!(parse_log_date("09/03/2024").is_err());
        assert!(parse_log_date("").is_err());
    }

    #[test]
    fn test_workout_id_display() {
        assert_eq!(WorkoutId(42).to_string(), "42");
        assert_eq!(WorkoutId(7).value(), 7);
    }
}
