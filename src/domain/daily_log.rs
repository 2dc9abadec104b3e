/// DailyLog entity for body metric snapshots
///
/// A DailyLog is one weigh-in for one calendar date: body weight, body-fat
/// percentage, muscle mass and up to three progress photos. The date is the
/// unique key, so saving twice for the same day replaces the earlier values.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Maximum number of progress photos attached to a single day
pub const MAX_PHOTOS_PER_DAY: usize = 3;

/// One body-metrics snapshot for a single calendar date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyLog {
    /// Calendar date this log is for (primary key)
    pub date: NaiveDate,
    /// Body weight in kg (0 when not recorded)
    pub weight: f64,
    /// Body fat in percent (0 when not recorded)
    #[serde(rename = "bodyFat")]
    pub body_fat: f64,
    /// Muscle mass in kg (0 when not recorded)
    #[serde(rename = "muscleMass")]
    pub muscle_mass: f64,
    /// Durable photo references, in the order they were added
    pub photos: Vec<String>,
}

impl DailyLog {
    /// Create a new daily log with validation
    pub fn new(
        date: NaiveDate,
        weight: f64,
        body_fat: f64,
        muscle_mass: f64,
        photos: Vec<String>,
    ) -> Result<Self, DomainError> {
        Self::validate_metric("weight", weight)?;
        Self::validate_metric("body fat", body_fat)?;
        Self::validate_metric("muscle mass", muscle_mass)?;
        if body_fat > 100.0 {
            return Err(DomainError::InvalidValue {
                message: "Body fat cannot exceed 100%".to_string(),
            });
        }
        Self::validate_photos(&photos)?;

        Ok(Self {
            date,
            weight,
            body_fat,
            muscle_mass,
            photos,
        })
    }

    /// Create a log from existing data (used when loading from database)
    ///
    /// Rows coming back from the store are trusted as-is; they were
    /// validated when they were written.
    pub fn from_existing(
        date: NaiveDate,
        weight: f64,
        body_fat: f64,
        muscle_mass: f64,
        photos: Vec<String>,
    ) -> Self {
        Self {
            date,
            weight,
            body_fat,
            muscle_mass,
            photos,
        }
    }

    /// Check if any progress photos are attached
    pub fn has_photos(&self) -> bool {
        !self.photos.is_empty()
    }

    fn validate_metric(name: &str, value: f64) -> Result<(), DomainError> {
        if !value.is_finite() || value < 0.0 {
            return Err(DomainError::InvalidValue {
                message: format!("{} must be a non-negative number", name),
            });
        }
        Ok(())
    }

    fn validate_photos(photos: &[String]) -> Result<(), DomainError> {
        if photos.len() > MAX_PHOTOS_PER_DAY {
            return Err(DomainError::TooManyPhotos {
                count: photos.len(),
                max: MAX_PHOTOS_PER_DAY,
            });
        }
        if photos.iter().any(|p| p.trim().is_empty()) {
            return Err(DomainError::Validation {
                message: "Photo references cannot be empty".to_string(),
            });
        }
        Ok(())
    }
}
