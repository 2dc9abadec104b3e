/// Basic integration tests
use lockedin::tools::*;
use lockedin::*;
use tempfile::TempDir;

#[cfg(test)]
mod basic_integration_tests {
    use super::*;

    #[tokio::test]
    async fn test_tracker_basic_workflow() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let paths = AppPaths::in_dir(temp_dir.path());
        let tracker = LockedIn::open(&paths).await.expect("Failed to open tracker");
        let today = local_today();

        let params = SaveBodyLogParams {
            weight: Some(82.0),
            body_fat: Some(19.0),
            muscle_mass: Some(37.5),
            ..Default::default()
        };
        save_body_log(tracker.storage(), tracker.photos(), params, today)
            .await
            .expect("Failed to save log");

        let status = home_status(tracker.storage(), today).unwrap();
        assert_eq!(status.day_state, DayState::LockedToday);
        assert_eq!(status.current_streak, 1);
        assert_eq!(status.days_logged, 1);
    }

    #[tokio::test]
    async fn test_database_persistence() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let paths = AppPaths::in_dir(temp_dir.path());
        let today = local_today();

        {
            let tracker = LockedIn::open(&paths).await.expect("Failed to open first tracker");
            set_goal(tracker.storage(), "78").unwrap();
            tracker
                .storage()
                .add_workout(today, "Deadlift", &[WorkoutSet::new(140.0, 5)])
                .unwrap();
        }

        // Reopening the same file must see the earlier writes
        let tracker = LockedIn::open(&paths).await.expect("Failed to open second tracker");
        assert_eq!(get_goal(tracker.storage()).unwrap(), Some(78.0));
        assert_eq!(tracker.storage().get_workouts_for_date(today).unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_log_with_photo() {
        let data_dir = TempDir::new().expect("Failed to create temp dir");
        let picked_dir = TempDir::new().expect("Failed to create temp dir");
        let picked = picked_dir.path().join("front.jpg");
        std::fs::write(&picked, b"jpeg bytes").unwrap();

        let tracker = LockedIn::open(&AppPaths::in_dir(data_dir.path())).await.unwrap();
        let today = local_today();

        let params = SaveBodyLogParams {
            weight: Some(82.0),
            body_fat: Some(19.0),
            muscle_mass: Some(37.5),
            photos: vec![picked.display().to_string()],
            ..Default::default()
        };
        let response = save_body_log(tracker.storage(), tracker.photos(), params, today)
            .await
            .unwrap();

        let stored = tracker.storage().get_daily_log(today).unwrap().unwrap();
        assert_eq!(stored.photos, response.log.photos);
        assert!(stored.photos[0].starts_with("logs/"));
        assert!(tracker.photos().resolve(&stored.photos[0]).is_file());
    }

    #[test]
    fn test_storage_interface() {
        let storage = SqliteStorage::open_in_memory().expect("Failed to create storage");

        // Test that storage implements TrackerStorage trait
        let _: &dyn TrackerStorage = &storage;
    }
}
