//! Command-line surface of the showcase host shell.

use clap::{Args, Parser, Subcommand};
use showcase_core::{DueTime, TaskFilter, TaskId};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "showcase")]
#[command(version)]
#[command(about = "Portfolio demos: project gallery, calculator and to-do list")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args)]
pub struct GlobalArgs {
    /// Root directory for the database and logs
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Local storage database file (overrides --data-dir)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Directory for rolling log files (overrides --data-dir)
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Keep tasks in memory only for this invocation
    #[arg(long, global = true)]
    pub ephemeral: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show which demo a path opens
    Route { path: String },
    /// List the project gallery
    Gallery,
    /// Feed key presses to the calculator and print the display
    Calc {
        /// Characters typed on the keypad, e.g. "12+7="
        input: String,
        /// Evaluate after the last key even without a trailing '='
        #[arg(long)]
        eval: bool,
    },
    /// Manage the to-do list
    #[command(subcommand)]
    Todo(TodoCommand),
}

#[derive(Subcommand)]
pub enum TodoCommand {
    /// Append a task
    Add {
        text: String,
        /// Due time of day, HH:MM
        #[arg(long)]
        due: Option<DueTime>,
    },
    /// Print tasks in list order
    List {
        #[arg(long, default_value_t = TaskFilter::All)]
        filter: TaskFilter,
    },
    /// Replace a task's text
    Edit { id: TaskId, text: String },
    /// Flip a task between pending and completed
    Toggle { id: TaskId },
    /// Remove a task
    Delete { id: TaskId },
    /// Drag the row at FROM onto the row at TO of the (filtered) view
    Move {
        from: usize,
        to: usize,
        #[arg(long, default_value_t = TaskFilter::All)]
        filter: TaskFilter,
    },
    /// Print totals per filter
    Counts,
}
