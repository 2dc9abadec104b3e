/// Streak and day-state behaviour against the local calendar
use chrono::Duration;
use lockedin::*;

#[test]
fn test_no_logs_yet() {
    assert_eq!(compute_day_state(&[]), DayState::NoLogsYet);
    assert_eq!(compute_streak(&[]), 0);
}

#[test]
fn test_locked_today() {
    let today = local_today();
    assert_eq!(compute_day_state(&[today]), DayState::LockedToday);
    assert_eq!(compute_day_state(&[today - Duration::days(9), today]), DayState::LockedToday);
}

#[test]
fn test_on_streak_from_yesterday() {
    let today = local_today();
    assert_eq!(compute_day_state(&[today - Duration::days(1)]), DayState::OnStreak);
}

#[test]
fn test_missed_after_gap() {
    let today = local_today();
    assert_eq!(compute_day_state(&[today - Duration::days(5)]), DayState::MissedYesterday);
}

#[test]
fn test_three_day_streak() {
    let today = local_today();
    let dates = [today, today - Duration::days(1), today - Duration::days(2)];
    assert_eq!(compute_streak(&dates), 3);
}

#[test]
fn test_grace_day_streak_stops_at_gap() {
    let today = local_today();
    let dates = [today - Duration::days(1), today - Duration::days(3)];
    assert_eq!(compute_streak(&dates), 1);
}

#[test]
fn test_streak_broken() {
    let today = local_today();
    let dates = [today - Duration::days(2), today - Duration::days(3)];
    assert_eq!(compute_streak(&dates), 0);
}

#[test]
fn test_long_streak_unsorted_input() {
    let today = local_today();
    let mut dates: Vec<_> = (0..30).map(|n| today - Duration::days(n)).collect();
    dates.reverse();
    dates.swap(3, 17);
    assert_eq!(compute_streak(&dates), 30);
}
