use clap::{Args, Subcommand};

use crate::cli::subcommands::TaskCommands;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Show the board: three columns and a task count.
    Board,
    /// Task management.
    Task {
        #[command(subcommand)]
        action: TaskCommands,
    },
    /// Ask the assistant about the board.
    Chat(ChatArgs),
    /// Print the JSON schema of an entity.
    Schema(SchemaArgs),
}

#[derive(Clone, Debug, Args)]
pub struct ChatArgs {
    /// Message to send. Without one, reads messages from stdin line by line.
    pub message: Vec<String>,
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// One of: task, draft, message
    pub type_name: String,
}
