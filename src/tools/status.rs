/// Home screen status: streak, day state and goal progress

use chrono::NaiveDate;
use serde::Serialize;

use crate::analytics::{goal_progress, GoalProgress};
use crate::domain::{compute_day_state_as_of, compute_streak_as_of, DailyLog, DayState};
use crate::storage::TrackerStorage;
use crate::tools::get_goal;
use crate::TrackerError;

/// Everything the home screen shows
#[derive(Debug, Serialize)]
pub struct HomeStatus {
    pub current_streak: u32,
    pub day_state: DayState,
    pub days_logged: usize,
    pub latest_log: Option<DailyLog>,
    pub goal: Option<GoalProgress>,
    pub message: String,
}

/// Recompute the home status from the stored logs
pub fn home_status<S: TrackerStorage>(storage: &S, today: NaiveDate) -> Result<HomeStatus, TrackerError> {
    let logs = storage.get_all_daily_logs()?;
    let dates: Vec<NaiveDate> = logs.iter().map(|log| log.date).collect();

    let current_streak = compute_streak_as_of(&dates, today);
    let day_state = compute_day_state_as_of(&dates, today);
    let goal = goal_progress(&logs, get_goal(storage)?);
    let latest_log = logs.into_iter().max_by_key(|log| log.date);

    let message = match day_state {
        DayState::LockedToday | DayState::OnStreak => format!(
            "Streak: {} day{}. {}",
            current_streak,
            if current_streak == 1 { "" } else { "s" },
            day_state.message()
        ),
        DayState::MissedYesterday | DayState::NoLogsYet => day_state.message().to_string(),
    };

    Ok(HomeStatus {
        current_streak,
        day_state,
        days_logged: dates.len(),
        latest_log,
        goal,
        message,
    })
}
