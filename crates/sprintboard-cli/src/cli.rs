use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::anyhow;
use clap::{ArgAction, Args, Parser, Subcommand};
use sprintboard_core::forms::{parse_priority, parse_status};
use sprintboard_shared::{TaskPriority, TaskStatus};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyVal {
    pub key: String,
    pub value: String,
}

impl std::str::FromStr for KeyVal {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        sprintboard_core::config::parse_override(s)
            .map(|(key, value)| Self { key, value })
            .ok_or_else(|| anyhow!("expected KEY=VALUE, got: {s}"))
    }
}

#[derive(Parser, Debug, Clone)]
#[command(
    name = "sprintboard",
    version,
    about = "Sprintboard: weekly calendar, task list and project board"
)]
pub struct Cli {
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[arg(short = 'q', long = "quiet", action = ArgAction::Count, global = true)]
    pub quiet: u8,

    #[arg(long = "config", global = true)]
    pub config: Option<PathBuf>,

    #[arg(long = "api-url", global = true)]
    pub api_url: Option<String>,

    #[arg(
        long = "set",
        value_name = "KEY=VALUE",
        value_parser = clap::builder::ValueParser::new(|s: &str| s.parse::<KeyVal>()),
        action = ArgAction::Append,
        global = true
    )]
    pub overrides: Vec<KeyVal>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Seven-day calendar starting on Sunday.
    Week {
        /// Any day inside the week to show.
        #[arg(long)]
        date: Option<String>,
        /// Whole weeks to move from that day.
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        offset: i64,
    },
    /// Every task, optionally filtered on the server.
    List {
        #[arg(long)]
        project: Option<Uuid>,
        #[arg(long)]
        sprint: Option<Uuid>,
    },
    Show {
        id: Uuid,
    },
    /// Kanban for one project, or the project cards.
    Board {
        #[arg(long)]
        project: Option<Uuid>,
    },
    Add(TaskArgs),
    Edit(EditArgs),
    Status {
        id: Uuid,
        #[arg(value_parser = status_arg)]
        status: TaskStatus,
    },
    /// Reschedule a task onto another day.
    Move {
        id: Uuid,
        date: String,
    },
    Delete {
        id: Uuid,
        #[arg(long)]
        yes: bool,
    },
    #[command(subcommand)]
    Project(ProjectCommand),
    #[command(subcommand)]
    Sprint(SprintCommand),
    /// Check that the API answers.
    Ping,
}

#[derive(Args, Debug, Clone, Default)]
pub struct TaskArgs {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long, value_parser = priority_arg)]
    pub priority: Option<TaskPriority>,
    #[arg(long, value_parser = status_arg)]
    pub status: Option<TaskStatus>,
    #[arg(long)]
    pub project: Option<Uuid>,
    #[arg(long)]
    pub sprint: Option<Uuid>,
    #[arg(long)]
    pub due: Option<String>,
    #[arg(long)]
    pub points: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct EditArgs {
    pub id: Uuid,
    #[command(flatten)]
    pub fields: TaskArgs,
    #[arg(long, conflicts_with = "description")]
    pub clear_description: bool,
    #[arg(long, conflicts_with = "project")]
    pub clear_project: bool,
    #[arg(long, conflicts_with = "sprint")]
    pub clear_sprint: bool,
    #[arg(long, conflicts_with = "due")]
    pub clear_due: bool,
    #[arg(long, conflicts_with = "points")]
    pub clear_points: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ProjectCommand {
    List,
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        color: Option<String>,
    },
    Edit {
        id: Uuid,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        color: Option<String>,
    },
    /// Deletes the project with its tasks and sprints.
    Delete {
        id: Uuid,
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum SprintCommand {
    List {
        #[arg(long)]
        project: Option<Uuid>,
    },
    Add {
        #[arg(long)]
        project: Uuid,
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        goal: Option<String>,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
    },
}

fn status_arg(raw: &str) -> Result<TaskStatus, String> {
    parse_status(raw).map_err(|err| err.to_string())
}

fn priority_arg(raw: &str) -> Result<TaskPriority, String> {
    parse_priority(raw).map_err(|err| err.to_string())
}

pub fn init_tracing(verbose: u8, quiet: u8) -> anyhow::Result<()> {
    let default_level = if quiet >= 2 {
        "error"
    } else if quiet == 1 {
        "warn"
    } else if verbose >= 3 {
        "trace"
    } else if verbose == 2 {
        "debug"
    } else if verbose == 1 {
        "info"
    } else {
        "warn"
    };

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| anyhow!("invalid RUST_LOG / log filter: {e}"))?;

    let init_result = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init();

    if let Err(err) = init_result {
        debug!(error = %err, "tracing subscriber already set, continuing");
    }

    Ok(())
}
