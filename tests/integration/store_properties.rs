/// Store behaviour against an on-disk database
use chrono::{Duration, NaiveDate};
use lockedin::*;
use tempfile::NamedTempFile;

fn open() -> (NamedTempFile, SqliteStorage) {
    let file = NamedTempFile::new().expect("Failed to create temp file");
    let storage = SqliteStorage::open(file.path()).expect("Failed to open storage");
    (file, storage)
}

fn date(s: &str) -> NaiveDate {
    parse_log_date(s).unwrap()
}

#[test]
fn test_upsert_twice_keeps_second_values() {
    let (_file, storage) = open();
    let day = date("2024-01-15");

    storage.upsert_daily_log(&DailyLog::new(day, 90.0, 25.0, 40.0, vec![]).unwrap()).unwrap();
    storage
        .upsert_daily_log(&DailyLog::new(day, 89.1, 24.6, 40.3, vec!["logs/x.jpg".to_string()]).unwrap())
        .unwrap();

    let logs = storage.get_all_daily_logs().unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0], DailyLog::new(day, 89.1, 24.6, 40.3, vec!["logs/x.jpg".to_string()]).unwrap());
}

#[test]
fn test_sets_round_trip() {
    let (_file, storage) = open();
    let day = date("2024-01-15");
    let sets = vec![
        WorkoutSet::new(60.0, 12),
        WorkoutSet::new(80.0, 8),
        WorkoutSet::new(92.5, 3),
        WorkoutSet::new(0.0, 20),
    ];

    let id = storage.add_workout(day, "Bench Press", &sets).unwrap();
    let loaded = storage.get_workouts_for_date(day).unwrap();

    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].id, id);
    assert_eq!(loaded[0].sets, sets);
}

#[test]
fn test_deleting_missing_rows_leaves_store_unchanged() {
    let (_file, storage) = open();
    let day = date("2024-01-15");
    storage.upsert_daily_log(&DailyLog::new(day, 90.0, 25.0, 40.0, vec![]).unwrap()).unwrap();
    let id = storage.add_workout(day, "Squat", &[WorkoutSet::new(100.0, 5)]).unwrap();

    storage.delete_daily_log(day + Duration::days(1)).unwrap();
    storage.delete_workout(WorkoutId(id.value() + 100)).unwrap();

    assert_eq!(storage.get_all_daily_logs().unwrap().len(), 1);
    assert_eq!(storage.get_all_workouts().unwrap().len(), 1);
}

#[test]
fn test_streak_from_stored_dates() {
    let (_file, storage) = open();
    let today = date("2024-03-10");
    for offset in [0, 1, 2, 4] {
        let day = today - Duration::days(offset);
        storage.upsert_daily_log(&DailyLog::new(day, 80.0, 20.0, 36.0, vec![]).unwrap()).unwrap();
    }

    let dates = storage.get_logged_dates().unwrap();
    assert_eq!(compute_streak_as_of(&dates, today), 3);
    assert_eq!(compute_day_state_as_of(&dates, today), DayState::LockedToday);
    assert_eq!(compute_streak_as_of(&dates, today + Duration::days(1)), 3);
    assert_eq!(compute_day_state_as_of(&dates, today + Duration::days(1)), DayState::OnStreak);
    assert_eq!(compute_day_state_as_of(&dates, today + Duration::days(2)), DayState::MissedYesterday);
}

#[test]
fn test_history_charts_from_store() {
    let (_file, storage) = open();
    storage.upsert_daily_log(&DailyLog::new(date("2024-02-03"), 81.0, 20.0, 36.0, vec![]).unwrap()).unwrap();
    storage.upsert_daily_log(&DailyLog::new(date("2024-02-01"), 82.0, 20.5, 35.8, vec![]).unwrap()).unwrap();
    storage.add_workout(date("2024-02-01"), "Squat", &[WorkoutSet::new(100.0, 5)]).unwrap();
    storage.add_workout(date("2024-02-03"), "Squat", &[WorkoutSet::new(105.0, 5), WorkoutSet::new(107.5, 2)]).unwrap();

    let logs = storage.get_all_daily_logs().unwrap();
    let weights: Vec<f64> = metric_series(&logs, Metric::Weight).iter().map(|p| p.value).collect();
    assert_eq!(weights, vec![82.0, 81.0]);

    let workouts = storage.get_all_workouts().unwrap();
    let progression = exercise_progression(&workouts, "Squat");
    assert_eq!(progression.last().unwrap().value, 107.5);
    assert_eq!(group_workouts_by_date(&workouts)[0].date, date("2024-02-03"));
}
