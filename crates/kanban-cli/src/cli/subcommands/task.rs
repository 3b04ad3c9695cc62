use clap::Subcommand;

/// Task entity commands.
#[derive(Clone, Debug, Subcommand)]
pub enum TaskCommands {
    /// List tasks in board order.
    List {
        /// Only tasks in this column (todo, in_progress, done).
        #[arg(long)]
        status: Option<String>,
    },
    /// Add a task to the end of the board.
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        priority: Option<String>,
        /// Due date as YYYY-MM-DD.
        #[arg(long)]
        due: Option<String>,
        #[arg(long)]
        status: Option<String>,
    },
    /// Move a task to another column.
    Move { id: String, status: String },
    /// Update a task.
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        priority: Option<String>,
        /// Due date as YYYY-MM-DD.
        #[arg(long, conflicts_with = "clear_due")]
        due: Option<String>,
        /// Remove the due date.
        #[arg(long)]
        clear_due: bool,
        #[arg(long)]
        status: Option<String>,
        #[arg(long, allow_negative_numbers = true)]
        position: Option<i64>,
    },
    /// Delete a task.
    Delete { id: String },
}
