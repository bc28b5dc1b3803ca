use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use log::info;
use rusqlite::Connection;
use taskpro_core::db::{open_db, reset_db};
use taskpro_core::{
    init_logging, AppConfig, LogLevel, NewTask, Priority, ServiceError, SqliteTaskRepository,
    SqliteWeatherLogRepository, TaskFilter, TaskService, TaskStatus, WeatherClient,
    WeatherService, DEFAULT_HISTORY_LIMIT, STATUS_CREATED, STATUS_DELETED,
};

use crate::output;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "taskpro", version, about = "Task dashboard with weather lookups")]
pub struct Cli {
    /// Database file; overrides config and `TASKPRO_DB_PATH`.
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create, list, show and delete tasks.
    #[command(subcommand)]
    Task(TaskCommand),

    /// Show task metrics and recent activity.
    Dashboard,

    /// Look up current weather and manage the lookup history.
    #[command(subcommand)]
    Weather(WeatherCommand),

    /// Database maintenance.
    #[command(subcommand)]
    Db(DbCommand),
}

#[derive(Debug, Subcommand)]
pub enum TaskCommand {
    /// Create a task; its summary is generated from the content.
    Add(AddTaskArgs),

    /// List tasks in creation order.
    List {
        /// Keep only these statuses (repeatable).
        #[arg(long = "status")]
        statuses: Vec<String>,

        /// Keep only these priorities (repeatable).
        #[arg(long = "priority")]
        priorities: Vec<String>,

        /// Case-sensitive title substring.
        #[arg(long)]
        title: Option<String>,
    },

    /// Print one task in full.
    Show { id: i64 },

    /// Permanently delete a task.
    Delete { id: i64 },
}

#[derive(Debug, Args)]
pub struct AddTaskArgs {
    #[arg(long)]
    pub title: String,

    #[arg(long)]
    pub content: String,

    /// Low, Medium or High.
    #[arg(long)]
    pub priority: Option<String>,

    /// Todo, In Progress or Done.
    #[arg(long)]
    pub status: Option<String>,

    /// YYYY-MM-DD.
    #[arg(long)]
    pub due: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum WeatherCommand {
    /// Fetch current conditions for a city and record them.
    Lookup {
        city: String,

        /// OpenWeatherMap key; falls back to config and `OPENWEATHER_API_KEY`.
        #[arg(long)]
        api_key: Option<String>,
    },

    /// Show the most recent lookups.
    History {
        #[arg(long, default_value_t = DEFAULT_HISTORY_LIMIT)]
        limit: u32,
    },

    /// Delete one history entry.
    Delete { id: i64 },
}

#[derive(Debug, Subcommand)]
pub enum DbCommand {
    /// Drop all tasks and weather history and recreate the schema.
    Reset {
        /// Required; the reset cannot be undone.
        #[arg(long)]
        yes: bool,
    },
}

impl Cli {
    /// Runs the selected command and returns the process exit code.
    pub async fn run(self) -> anyhow::Result<i32> {
        let mut config = AppConfig::load().context("failed to load configuration")?;
        if let Some(path) = self.db {
            config.database_path = Some(path);
        }
        start_logging(&config);

        let db_path = config.resolved_database_path()?;
        if let Some(parent) = db_path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let mut conn = open_db(&db_path)
            .with_context(|| format!("failed to open database {}", db_path.display()))?;

        let outcome = match self.command {
            Command::Task(command) => run_task(&conn, command),
            Command::Dashboard => {
                let service = TaskService::new(SqliteTaskRepository::try_new(&conn)?);
                service.dashboard().map(|snapshot| output::print_dashboard(&snapshot))
            }
            Command::Weather(command) => run_weather(&conn, &config, command).await?,
            Command::Db(DbCommand::Reset { yes }) => {
                if !yes {
                    eprintln!("Refusing to reset without --yes.");
                    return Ok(2);
                }
                reset_db(&mut conn)?;
                println!("{STATUS_DELETED}: Database reset.");
                Ok(())
            }
        };

        match outcome {
            Ok(()) => Ok(0),
            Err(err) => {
                output::print_error(&err);
                Ok(1)
            }
        }
    }
}

fn run_task(conn: &Connection, command: TaskCommand) -> Result<(), ServiceError> {
    let service = TaskService::new(SqliteTaskRepository::try_new(conn)?);
    match command {
        TaskCommand::Add(args) => {
            let mut input = NewTask::new(args.title, args.content);
            input.priority = args.priority;
            input.status = args.status;
            input.due_date = args.due;
            let task = service.create_task(&input)?;
            println!("{STATUS_CREATED}: Task created.");
            output::print_task(&task);
        }
        TaskCommand::List {
            statuses,
            priorities,
            title,
        } => {
            let mut filter = TaskFilter::default()
                .with_statuses(parse_all(&statuses, TaskStatus::parse, "status")?)
                .with_priorities(parse_all(&priorities, Priority::parse, "priority")?);
            if let Some(title) = title {
                filter = filter.with_title_contains(title);
            }
            output::print_task_table(&service.list_tasks(&filter)?);
        }
        TaskCommand::Show { id } => output::print_task(&service.get_task(id)?),
        TaskCommand::Delete { id } => {
            service.delete_task(id)?;
            println!("{STATUS_DELETED}: Task deleted.");
        }
    }
    Ok(())
}

async fn run_weather(
    conn: &Connection,
    config: &AppConfig,
    command: WeatherCommand,
) -> anyhow::Result<Result<(), ServiceError>> {
    let client = WeatherClient::new(config.weather.clone())?;
    let service = WeatherService::new(SqliteWeatherLogRepository::try_new(conn)?, client);

    let outcome = match command {
        WeatherCommand::Lookup { city, api_key } => {
            let api_key = api_key.or_else(|| config.weather.api_key.clone());
            service
                .lookup_and_log(&city, api_key.as_deref())
                .await
                .map(|report| output::print_weather(&city, &report))
        }
        WeatherCommand::History { limit } => service
            .recent_logs(limit)
            .map(|logs| output::print_weather_history(&logs)),
        WeatherCommand::Delete { id } => service
            .delete_log(id)
            .map(|()| println!("{STATUS_DELETED}: Weather log deleted.")),
    };
    Ok(outcome)
}

fn parse_all<T>(
    values: &[String],
    parse: fn(&str) -> Option<T>,
    field: &str,
) -> Result<Vec<T>, ServiceError> {
    values
        .iter()
        .map(|value| {
            parse(value)
                .ok_or_else(|| ServiceError::Validation(format!("invalid {field} '{value}'")))
        })
        .collect()
}

/// Logging problems are reported but never block the command.
fn start_logging(config: &AppConfig) {
    let level = match config.log_level.as_deref() {
        Some(raw) => LogLevel::parse(raw).unwrap_or_else(|err| {
            eprintln!("warning: {err}; using default level");
            LogLevel::build_default()
        }),
        None => LogLevel::build_default(),
    };

    let log_dir = match config.resolved_log_dir() {
        Ok(dir) => absolutize(&dir),
        Err(err) => {
            eprintln!("warning: logging disabled: {err}");
            return;
        }
    };

    match init_logging(level, &log_dir) {
        Ok(()) => info!(
            "event=cli_start module=cli status=ok version={}",
            taskpro_core::core_version()
        ),
        Err(err) => eprintln!("warning: logging disabled: {err}"),
    }
}

fn absolutize(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .unwrap_or_else(|_| path.to_path_buf())
}
