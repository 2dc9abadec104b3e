/// Target weight goal stored in the settings table

use crate::domain::{DomainError, TARGET_WEIGHT_KEY};
use crate::storage::TrackerStorage;
use crate::TrackerError;

/// Parse and save a target weight in kg
pub fn set_goal<S: TrackerStorage>(storage: &S, value: &str) -> Result<f64, TrackerError> {
    let target = parse_target(value)?;
    storage.save_setting(TARGET_WEIGHT_KEY, &target.to_string())?;
    tracing::debug!("Target weight set to {}kg", target);
    Ok(target)
}

/// The saved target weight, if any
///
/// A stored value that no longer parses is treated as unset.
pub fn get_goal<S: TrackerStorage>(storage: &S) -> Result<Option<f64>, TrackerError> {
    let raw = match storage.get_setting(TARGET_WEIGHT_KEY)? {
        Some(raw) => raw,
        None => return Ok(None),
    };

    match parse_target(&raw) {
        Ok(target) => Ok(Some(target)),
        Err(e) => {
            tracing::warn!("Ignoring stored target weight '{}': {}", raw, e);
            Ok(None)
        }
    }
}

fn parse_target(value: &str) -> Result<f64, DomainError> {
    let target: f64 = value.trim().parse().map_err(|_| DomainError::InvalidValue {
        message: format!("Target weight must be a number, got '{}'", value.trim()),
    })?;

    if !target.is_finite() || target <= 0.0 {
        return Err(DomainError::InvalidValue {
            message: "Target weight must be greater than zero".to_string(),
        });
    }
    Ok(target)
}
