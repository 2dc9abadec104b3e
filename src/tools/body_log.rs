/// Saving, editing and deleting daily body logs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{
    compute_day_state_as_of, compute_streak_as_of, format_log_date, parse_log_date, DailyLog,
    DayState, DomainError, MAX_PHOTOS_PER_DAY,
};
use crate::photos::PhotoStore;
use crate::storage::TrackerStorage;
use crate::TrackerError;

/// Parameters for saving a daily log
#[derive(Debug, Default, Deserialize)]
pub struct SaveBodyLogParams {
    /// Date to log, defaults to today
    pub date: Option<String>,
    pub weight: Option<f64>,
    pub body_fat: Option<f64>,
    pub muscle_mass: Option<f64>,
    /// Picked or already-persisted photo references
    #[serde(default)]
    pub photos: Vec<String>,
    /// Editing an existing log rather than creating one
    #[serde(default)]
    pub edit: bool,
    /// Overwrite an existing log when creating
    #[serde(default)]
    pub replace: bool,
}

/// Response from saving a daily log
#[derive(Debug, Serialize)]
pub struct SaveBodyLogResponse {
    pub success: bool,
    pub message: String,
    pub log: DailyLog,
    pub current_streak: u32,
    pub day_state: DayState,
}

/// Response from deleting a daily log
#[derive(Debug, Serialize)]
pub struct DeleteBodyLogResponse {
    pub success: bool,
    pub message: String,
}

/// Validate, persist photos and save a daily log
pub async fn save_body_log<S, P>(
    storage: &S,
    photo_store: &P,
    params: SaveBodyLogParams,
    today: NaiveDate,
) -> Result<SaveBodyLogResponse, TrackerError>
where
    S: TrackerStorage,
    P: PhotoStore + ?Sized,
{
    let (weight, body_fat, muscle_mass) = match (params.weight, params.body_fat, params.muscle_mass) {
        (Some(w), Some(bf), Some(mm)) => (w, bf, mm),
        _ => {
            return Err(DomainError::Validation {
                message: "Fill all fields: weight, body fat and muscle mass".to_string(),
            }
            .into())
        }
    };

    let date = match params.date.as_deref() {
        Some(s) => parse_log_date(s)?,
        None => today,
    };

    if params.photos.len() > MAX_PHOTOS_PER_DAY {
        return Err(DomainError::TooManyPhotos {
            count: params.photos.len(),
            max: MAX_PHOTOS_PER_DAY,
        }
        .into());
    }

    let existing = storage.get_daily_log(date)?;
    if params.edit && existing.is_none() {
        return Err(DomainError::Validation {
            message: format!("No log for {} to edit", format_log_date(date)),
        }
        .into());
    }
    if !params.edit && existing.is_some() && !params.replace {
        return Err(DomainError::Validation {
            message: format!("Already logged for {}", format_log_date(date)),
        }
        .into());
    }

    // Metrics are checked before any photo is copied into app storage
    let mut log = DailyLog::new(date, weight, body_fat, muscle_mass, params.photos.clone())?;

    let mut copied = Vec::new();
    let mut saved_photos = Vec::with_capacity(params.photos.len());
    for (index, uri) in params.photos.iter().enumerate() {
        match photo_store.persist_picked_photo(date, uri, index).await {
            Ok(durable) => {
                if durable != *uri {
                    copied.push(durable.clone());
                }
                saved_photos.push(durable);
            }
            Err(e) => {
                remove_copied_photos(photo_store, &copied).await;
                return Err(e.into());
            }
        }
    }
    log.photos = saved_photos;

    let written = if params.edit {
        storage.update_daily_log(&log).map(|_| ())
    } else {
        storage.upsert_daily_log(&log)
    };
    if let Err(e) = written {
        remove_copied_photos(photo_store, &copied).await;
        return Err(e.into());
    }

    let dates = storage.get_logged_dates()?;
    let current_streak = compute_streak_as_of(&dates, today);
    let day_state = compute_day_state_as_of(&dates, today);

    Ok(SaveBodyLogResponse {
        success: true,
        message: format!(
            "Logged {}. Current streak: {} day{}",
            format_log_date(date),
            current_streak,
            if current_streak == 1 { "" } else { "s" }
        ),
        log,
        current_streak,
        day_state,
    })
}

async fn remove_copied_photos<P: PhotoStore + ?Sized>(photo_store: &P, copied: &[String]) {
    for durable in copied {
        let path = photo_store.resolve(durable);
        if let Err(e) = tokio::fs::remove_file(&path).await {
            tracing::warn!("Failed to remove unsaved photo {:?}: {}", path, e);
        }
    }
}

/// Delete the daily log for a date
pub fn delete_body_log<S: TrackerStorage>(
    storage: &S,
    date: &str,
) -> Result<DeleteBodyLogResponse, TrackerError> {
    let date = parse_log_date(date)?;
    storage.delete_daily_log(date)?;

    Ok(DeleteBodyLogResponse {
        success: true,
        message: format!("Deleted log for {}", format_log_date(date)),
    })
}

/// All daily logs, newest first, for history lists
pub fn body_log_history<S: TrackerStorage>(storage: &S) -> Result<Vec<DailyLog>, TrackerError> {
    let mut logs = storage.get_all_daily_logs()?;
    logs.reverse();
    Ok(logs)
}
