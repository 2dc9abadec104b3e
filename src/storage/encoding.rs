/// Text encoding for list-valued columns
///
/// `daily_logs.photos` and `workouts.sets` hold JSON arrays. Writing always
/// produces valid JSON. Reading never fails: a NULL, empty or malformed value
/// decodes to an empty list so one bad column cannot hide the rest of its row.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::WorkoutSet;
use crate::storage::StorageError;

/// Encode a list as a JSON array
pub fn encode_list<T: Serialize>(items: &[T]) -> Result<String, StorageError> {
    Ok(serde_json::to_string(items)?)
}

/// Decode a JSON array column, degrading to an empty list
///
/// `column` is only used for the diagnostic when the value is malformed.
pub fn decode_list<T: DeserializeOwned>(column: &str, raw: Option<&str>) -> Vec<T> {
    let text = match raw.map(str::trim) {
        None | Some("") => return Vec::new(),
        Some(text) => text,
    };

    match serde_json::from_str::<Vec<T>>(text) {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!("Malformed {} value, using empty list: {}", column, e);
            Vec::new()
        }
    }
}

pub fn decode_photos(raw: Option<&str>) -> Vec<String> {
    decode_list("photos", raw)
}

pub fn decode_sets(raw: Option<&str>) -> Vec<WorkoutSet> {
    decode_list("sets", raw)
}
