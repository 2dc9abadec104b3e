/// Streak and day-state evaluation
///
/// Both values are recomputed from the full set of logged dates every time
/// they are asked for. Nothing here is stored: the same `(today, dates)`
/// input always produces the same answer.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::local_today;

/// The user's logging status relative to today
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayState {
    /// Today already has a log
    LockedToday,
    /// Nothing yet today, but yesterday was logged
    OnStreak,
    /// There is history, but neither today nor yesterday was logged
    MissedYesterday,
    /// Nothing has ever been logged
    NoLogsYet,
}

impl DayState {
    /// Stable identifier, matching the serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            DayState::LockedToday => "locked_today",
            DayState::OnStreak => "on_streak",
            DayState::MissedYesterday => "missed_yesterday",
            DayState::NoLogsYet => "no_logs_yet",
        }
    }

    /// Short message for the home screen
    pub fn message(&self) -> &'static str {
        match self {
            DayState::LockedToday => "Locked in for today.",
            DayState::OnStreak => "Streak is alive. Log today to keep it going!",
            DayState::MissedYesterday => "You missed yesterday. Log today to start a new streak.",
            DayState::NoLogsYet => "Log your first weigh-in to get started.",
        }
    }
}

/// Current streak using the local calendar for "today"
pub fn compute_streak(dates: &[NaiveDate]) -> u32 {
    compute_streak_as_of(dates, local_today())
}

/// Current day state using the local calendar for "today"
pub fn compute_day_state(dates: &[NaiveDate]) -> DayState {
    compute_day_state_as_of(dates, local_today())
}

/// Count consecutive logged days ending today, or yesterday if today is
/// not logged yet
///
/// `dates` may be unsorted and may contain duplicates.
pub fn compute_streak_as_of(dates: &[NaiveDate], today: NaiveDate) -> u32 {
    if dates.is_empty() {
        return 0;
    }

    let logged: HashSet<NaiveDate> = dates.iter().copied().collect();

    // One grace day: an unlogged today does not break a streak that was
    // alive through yesterday.
    let mut cursor = if logged.contains(&today) {
        today
    } else {
        match today.pred_opt() {
            Some(yesterday) if logged.contains(&yesterday) => yesterday,
            _ => return 0,
        }
    };

    let mut streak = 0;
    while logged.contains(&cursor) {
        streak += 1;
        match cursor.pred_opt() {
            Some(prev) => cursor = prev,
            None => break,
        }
    }

    streak
}

/// Classify today from three facts: has today, has yesterday, has any history
pub fn compute_day_state_as_of(dates: &[NaiveDate], today: NaiveDate) -> DayState {
    if dates.is_empty() {
        return DayState::NoLogsYet;
    }

    if dates.contains(&today) {
        return DayState::LockedToday;
    }

    match today.pred_opt() {
        Some(yesterday) if dates.contains(&yesterday) => DayState::OnStreak,
        _ => DayState::MissedYesterday,
    }
}
