/// Main entry point for the LockedIn command-line tracker
///
/// This file sets up logging, parses command line arguments, opens the
/// tracker once and dispatches a single command against it.

use clap::{Args as ClapArgs, Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

use lockedin::tools::{
    body_log_history, delete_body_log, delete_workout, exercise_catalog, get_goal, home_status,
    list_workouts, save_body_log, save_workout, set_goal, SaveBodyLogParams, SaveWorkoutParams,
};
use lockedin::{
    consistency_grid, local_today, AppPaths, LockedIn, TrackerError, TrackerStorage, WorkoutSet,
    DEFAULT_GRID_DAYS,
};

/// Longest grid the CLI will draw (about ten years)
const MAX_GRID_DAYS: i64 = 3660;

/// Command line arguments for the LockedIn tracker
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding the database and photos
    /// If not provided, uses a default location in the user's home directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Enable verbose output (implies debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show streak, day state and goal progress
    Status,
    /// Log today's (or a given day's) body metrics
    Log(LogArgs),
    /// Edit an existing day's body metrics
    Edit(LogArgs),
    /// Delete the body log for a date
    DeleteLog { date: String },
    /// List body logs, newest first
    History,
    /// Log, edit, delete or list workouts
    #[command(subcommand)]
    Workout(WorkoutCommand),
    /// List known exercise names
    Exercises,
    /// Show or set the target weight
    #[command(subcommand)]
    Goal(GoalCommand),
    /// Show which of the recent days were logged
    Grid {
        #[arg(long, default_value_t = DEFAULT_GRID_DAYS, value_parser = clap::value_parser!(u32).range(1..=MAX_GRID_DAYS))]
        days: u32,
    },
}

#[derive(ClapArgs, Debug)]
struct LogArgs {
    /// Date as YYYY-MM-DD (defaults to today)
    #[arg(long)]
    date: Option<String>,
    /// Body weight in kg
    #[arg(long)]
    weight: Option<f64>,
    /// Body fat in percent
    #[arg(long)]
    body_fat: Option<f64>,
    /// Muscle mass in kg
    #[arg(long)]
    muscle_mass: Option<f64>,
    /// Progress photo to attach (up to 3)
    #[arg(long = "photo")]
    photos: Vec<String>,
    /// Overwrite an existing log for the same date
    #[arg(long)]
    replace: bool,
}

#[derive(Subcommand, Debug)]
enum WorkoutCommand {
    /// Log an exercise with its sets
    Add {
        exercise: String,
        /// Set as WEIGHTxREPS, e.g. 80x5 (repeatable)
        #[arg(long = "set", value_parser = parse_set, required = true)]
        sets: Vec<WorkoutSet>,
        #[arg(long)]
        date: Option<String>,
    },
    /// Replace the sets of a logged exercise
    Edit {
        id: i64,
        #[arg(long = "set", value_parser = parse_set, required = true)]
        sets: Vec<WorkoutSet>,
    },
    /// Delete a logged exercise
    Delete { id: i64 },
    /// List exercises logged on a date (defaults to today)
    List {
        #[arg(long)]
        date: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum GoalCommand {
    /// Set the target weight in kg
    Set { value: String },
    /// Show the target weight
    Show,
}

/// Parse `WEIGHTxREPS` into a set
fn parse_set(s: &str) -> Result<WorkoutSet, String> {
    let (weight, reps) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WEIGHTxREPS, got '{}'", s))?;
    let weight: f64 = weight.trim().parse().map_err(|_| format!("invalid weight '{}'", weight))?;
    let reps: u32 = reps.trim().parse().map_err(|_| format!("invalid reps '{}'", reps))?;
    Ok(WorkoutSet::new(weight, reps))
}

fn print_result<T: Serialize>(json: bool, value: &T, text: impl FnOnce(&T) -> String) -> Result<(), TrackerError> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", text(value));
    }
    Ok(())
}

fn body_params(args: LogArgs, edit: bool) -> SaveBodyLogParams {
    SaveBodyLogParams {
        date: args.date,
        weight: args.weight,
        body_fat: args.body_fat,
        muscle_mass: args.muscle_mass,
        photos: args.photos,
        edit,
        replace: args.replace,
    }
}

async fn run(tracker: &LockedIn, command: Command, json: bool) -> Result<(), TrackerError> {
    let storage = tracker.storage();
    let today = local_today();

    match command {
        Command::Status => {
            let status = home_status(storage, today)?;
            print_result(json, &status, |s| {
                let mut out = format!("{}\nDays logged: {}", s.message, s.days_logged);
                if let Some(goal) = &s.goal {
                    out.push_str(&format!("\n{}", goal.message()));
                }
                out
            })?;
        }
        Command::Log(args) => {
            let response = save_body_log(storage, tracker.photos(), body_params(args, false), today).await?;
            print_result(json, &response, |r| r.message.clone())?;
        }
        Command::Edit(args) => {
            let response = save_body_log(storage, tracker.photos(), body_params(args, true), today).await?;
            print_result(json, &response, |r| r.message.clone())?;
        }
        Command::DeleteLog { date } => {
            let response = delete_body_log(storage, &date)?;
            print_result(json, &response, |r| r.message.clone())?;
        }
        Command::History => {
            let logs = body_log_history(storage)?;
            print_result(json, &logs, |logs| {
                logs.iter()
                    .map(|l| {
                        format!(
                            "{}  {:.1}kg  {:.1}%  {:.1}kg  photos: {}",
                            l.date, l.weight, l.body_fat, l.muscle_mass, l.photos.len()
                        )
                    })
                    .collect::<Vec<_>>()
                    .join("\n")
            })?;
        }
        Command::Workout(WorkoutCommand::Add { exercise, sets, date }) => {
            let params = SaveWorkoutParams {
                id: None,
                date,
                exercise: Some(exercise),
                sets,
            };
            let response = save_workout(storage, params, today)?;
            print_result(json, &response, |r| format!("{} [id {}]", r.message, r.id))?;
        }
        Command::Workout(WorkoutCommand::Edit { id, sets }) => {
            let params = SaveWorkoutParams {
                id: Some(id),
                sets,
                ..Default::default()
            };
            let response = save_workout(storage, params, today)?;
            print_result(json, &response, |r| r.message.clone())?;
        }
        Command::Workout(WorkoutCommand::Delete { id }) => {
            delete_workout(storage, id)?;
            println!("Deleted workout {}", id);
        }
        Command::Workout(WorkoutCommand::List { date }) => {
            let workouts = list_workouts(storage, date.as_deref(), today)?;
            print_result(json, &workouts, |workouts| {
                if workouts.is_empty() {
                    return "No exercises logged.".to_string();
                }
                workouts
                    .iter()
                    .map(|w| {
                        let sets: Vec<String> =
                            w.sets.iter().map(|s| format!("{}kg x {}", s.weight, s.reps)).collect();
                        format!("[{}] {}: {}", w.id, w.exercise, sets.join(", "))
                    })
                    .collect::<Vec<_>>()
                    .join("\n")
            })?;
        }
        Command::Exercises => {
            let names = exercise_catalog(storage)?;
            print_result(json, &names, |names| names.join("\n"))?;
        }
        Command::Goal(GoalCommand::Set { value }) => {
            let target = set_goal(storage, &value)?;
            println!("Target weight set to {}kg", target);
        }
        Command::Goal(GoalCommand::Show) => {
            let target = get_goal(storage)?;
            print_result(json, &target, |t| match t {
                Some(t) => format!("Goal: {}kg", t),
                None => "No goal set".to_string(),
            })?;
        }
        Command::Grid { days } => {
            let dates = storage.get_logged_dates()?;
            let grid = consistency_grid(&dates, today, days);
            print_result(json, &grid, |grid| {
                grid.chunks(7)
                    .map(|week| week.iter().map(|d| if d.logged { '#' } else { '.' }).collect::<String>())
                    .collect::<Vec<_>>()
                    .join("\n")
            })?;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Set up logging based on command line flags
    let log_level = if args.verbose {
        "debug"
    } else if args.debug {
        "info"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(format!("lockedin={}", log_level))
        .with_writer(std::io::stderr) // Keep stdout for command output
        .init();

    let paths = AppPaths::resolve(args.data_dir)?;
    info!("Using database at: {}", paths.database.display());

    let tracker = LockedIn::open(&paths).await?;
    run(&tracker, args.command, args.json).await?;

    Ok(())
}
