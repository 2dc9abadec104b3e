/// Analytics over already-loaded logs
///
/// These helpers shape stored rows for charts and summaries: metric series,
/// per-exercise progression, workouts grouped by day, the consistency grid
/// and distance to the target weight. They are pure and do no I/O.

use std::collections::{BTreeMap, HashSet};

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::domain::{DailyLog, WorkoutLog};

/// Number of days shown in the consistency grid (15 weeks)
pub const DEFAULT_GRID_DAYS: u32 = 105;

/// Difference below which the target weight counts as reached
const GOAL_TOLERANCE_KG: f64 = 0.05;

/// A body metric that can be charted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Weight,
    BodyFat,
    MuscleMass,
}

impl Metric {
    /// Read this metric off a log
    pub fn value(&self, log: &DailyLog) -> f64 {
        match self {
            Metric::Weight => log.weight,
            Metric::BodyFat => log.body_fat,
            Metric::MuscleMass => log.muscle_mass,
        }
    }
}

/// One point on a chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// All workouts logged on one date
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkoutDay {
    pub date: NaiveDate,
    pub workouts: Vec<WorkoutLog>,
}

/// One cell of the consistency grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridDay {
    pub date: NaiveDate,
    pub logged: bool,
}

/// Latest weight compared with the target weight
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GoalProgress {
    pub current: f64,
    pub target: f64,
    /// `current - target`: positive when above the target
    pub difference: f64,
}

impl GoalProgress {
    pub fn is_reached(&self) -> bool {
        self.difference.abs() < GOAL_TOLERANCE_KG
    }

    pub fn message(&self) -> String {
        if self.is_reached() {
            format!("At goal weight of {:.1}kg", self.target)
        } else if self.difference > 0.0 {
            format!("{:.1}kg above goal of {:.1}kg", self.difference, self.target)
        } else {
            format!("{:.1}kg below goal of {:.1}kg", -self.difference, self.target)
        }
    }
}

/// Daily logs ordered oldest first, as charts expect
pub fn body_series(logs: &[DailyLog]) -> Vec<DailyLog> {
    let mut sorted = logs.to_vec();
    sorted.sort_by_key(|log| log.date);
    sorted
}

/// One metric over time, oldest first
pub fn metric_series(logs: &[DailyLog], metric: Metric) -> Vec<SeriesPoint> {
    body_series(logs)
        .iter()
        .map(|log| SeriesPoint {
            date: log.date,
            value: metric.value(log),
        })
        .collect()
}

/// Heaviest set per logged workout of one exercise, oldest first
pub fn exercise_progression(workouts: &[WorkoutLog], exercise: &str) -> Vec<SeriesPoint> {
    let mut points: Vec<SeriesPoint> = workouts
        .iter()
        .filter(|w| w.exercise == exercise)
        .map(|w| SeriesPoint {
            date: w.date,
            value: w.top_set_weight(),
        })
        .collect();
    points.sort_by_key(|p| p.date);
    points
}

/// Group workouts by date, newest date first
///
/// Within a day, workouts keep the order they were given in.
pub fn group_workouts_by_date(workouts: &[WorkoutLog]) -> Vec<WorkoutDay> {
    let mut groups: BTreeMap<NaiveDate, Vec<WorkoutLog>> = BTreeMap::new();
    for workout in workouts {
        groups.entry(workout.date).or_default().push(workout.clone());
    }

    groups
        .into_iter()
        .rev()
        .map(|(date, workouts)| WorkoutDay { date, workouts })
        .collect()
}

/// The last `days` dates up to and including `today`, oldest first
///
/// The grid stops at the earliest representable date.
pub fn consistency_grid(dates: &[NaiveDate], today: NaiveDate, days: u32) -> Vec<GridDay> {
    let logged: HashSet<NaiveDate> = dates.iter().copied().collect();
    let available = today.signed_duration_since(NaiveDate::MIN).num_days() + 1;
    let days = i64::from(days).min(available);

    (0..days)
        .rev()
        .filter_map(|offset| today.checked_sub_signed(Duration::days(offset)))
        .map(|date| GridDay {
            date,
            logged: logged.contains(&date),
        })
        .collect()
}

/// Compare the most recent weigh-in with the target weight
///
/// Returns `None` when there is no target or no weigh-in with a weight.
pub fn goal_progress(logs: &[DailyLog], target: Option<f64>) -> Option<GoalProgress> {
    let target = target?;
    let latest = logs
        .iter()
        .filter(|log| log.weight > 0.0)
        .max_by_key(|log| log.date)?;

    Some(GoalProgress {
        current: latest.weight,
        target,
        difference: latest.weight - target,
    })
}
