/// Basic unit tests to verify core functionality
use lockedin::*;
use tempfile::NamedTempFile;

#[cfg(test)]
mod basic_unit_tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_daily_log_creation() {
        let today = local_today();
        let log = DailyLog::new(today, 80.2, 18.5, 37.1, vec![]);

        assert!(log.is_ok());
        let log = log.unwrap();
        assert_eq!(log.date, today);
        assert!(!log.has_photos());
    }

    #[test]
    fn test_blank_sets_filtered() {
        let sets = logged_sets(&[WorkoutSet::new(0.0, 0), WorkoutSet::new(60.0, 10)]).unwrap();
        assert_eq!(sets, vec![WorkoutSet::new(60.0, 10)]);
    }

    #[test]
    fn test_date_round_trip() {
        let date = parse_log_date("2023-12-31").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());
        assert_eq!(format_log_date(date), "2023-12-31");
    }

    #[test]
    fn test_storage_creation() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let storage = SqliteStorage::open(temp_file.path());
        assert!(storage.is_ok());
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let storage = SqliteStorage::open_in_memory().expect("Failed to create storage");
        storage.initialize().unwrap();
        storage.initialize().unwrap();
        assert!(storage.get_all_daily_logs().unwrap().is_empty());
    }

    #[test]
    fn test_open_in_missing_directory_fails() {
        let result = SqliteStorage::open("/nonexistent-dir/for/lockedin/test.db");
        assert!(matches!(result, Err(StorageError::Init(_))));
    }
}
