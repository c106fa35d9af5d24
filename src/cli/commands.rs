use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "td", about = concat!("td v", env!("CARGO_PKG_VERSION"), " - a personal task tracker"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Task file to use instead of the configured one
    #[arg(short = 'f', long = "data", global = true)]
    pub data: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a new task
    Add(AddArgs),
    /// Delete a task
    Delete(IdArgs),
    /// Mark a task done
    Done(IdArgs),
    /// List tasks, optionally filtered and sorted
    List(ListArgs),
    /// Show task counts
    Stats,
    /// View the recovery log
    Recovery(RecoveryArgs),
}

// ---------------------------------------------------------------------------
// Write command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct AddArgs {
    /// Task title
    pub task: String,
    /// Due date, "YYYY-MM-DD HH:MM:SS"
    #[arg(long)]
    pub due: String,
    /// Category
    #[arg(long, default_value = "")]
    pub category: String,
    /// Priority (1-5)
    #[arg(long, short = 'p', default_value = "3")]
    pub priority: String,
    /// Longer description
    #[arg(long, short = 'd', default_value = "")]
    pub description: String,
}

#[derive(Args)]
pub struct IdArgs {
    /// Task ID
    pub id: u64,
}

// ---------------------------------------------------------------------------
// Read command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ListArgs {
    /// Only tasks containing this text in any field (case-insensitive)
    #[arg(long, short = 's')]
    pub search: Option<String>,
    /// Only tasks with this priority
    #[arg(long, short = 'p')]
    pub priority: Option<i64>,
    /// Sort by field: id, task, category, priority, status, description, created_at, due_date
    #[arg(long)]
    pub sort: Option<String>,
    /// Sort descending
    #[arg(long, requires = "sort")]
    pub desc: bool,
}

#[derive(Args)]
pub struct RecoveryArgs {
    /// Show at most this many entries
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,
}
