use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{ColorMode, GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `kanban` binary.
#[derive(Debug, Parser)]
#[command(name = "kanban", version, about = "Kanban board with a streaming assistant")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw (defaults to `general.default_format`)
    #[arg(short, long, global = true)]
    pub format: Option<OutputFormat>,

    /// Table coloring: auto, always, never
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorMode,

    /// Quiet mode (suppress notices and non-essential output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Project root holding `.kanban/` (defaults to auto-detect)
    #[arg(short, long, global = true)]
    pub project: Option<String>,
}

impl Cli {
    /// Extract global flags, falling back to `default_format` when no
    /// `--format` was given.
    #[must_use]
    pub fn global_flags(&self, default_format: OutputFormat) -> GlobalFlags {
        GlobalFlags {
            format: self.format.unwrap_or(default_format),
            color: self.color,
            quiet: self.quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::subcommands::TaskCommands;
    use super::{Cli, Commands, GlobalFlags, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from(["kanban", "--format", "table", "--verbose", "board"])
            .expect("cli should parse");

        assert_eq!(cli.format, Some(OutputFormat::Table));
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Board));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["kanban", "board", "--format", "raw", "--quiet"])
            .expect("cli should parse");

        assert_eq!(cli.format, Some(OutputFormat::Raw));
        assert!(cli.quiet);
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["kanban", "--format", "xml", "board"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn missing_format_uses_config_default() {
        let cli = Cli::try_parse_from(["kanban", "board"]).expect("cli should parse");
        let flags: GlobalFlags = cli.global_flags(OutputFormat::Table);
        assert_eq!(flags.format, OutputFormat::Table);

        let cli = Cli::try_parse_from(["kanban", "-f", "json", "board"]).expect("cli should parse");
        assert_eq!(cli.global_flags(OutputFormat::Table).format, OutputFormat::Json);
    }

    #[test]
    fn task_add_parses_all_fields() {
        let cli = Cli::try_parse_from([
            "kanban",
            "task",
            "add",
            "--title",
            "Write spec",
            "--priority",
            "high",
            "--due",
            "2026-11-01",
            "--status",
            "in-progress",
        ])
        .expect("cli should parse");

        let Commands::Task { action } = cli.command else {
            panic!("expected task command");
        };
        let TaskCommands::Add {
            title,
            priority,
            due,
            status,
            description,
        } = action
        else {
            panic!("expected task add");
        };
        assert_eq!(title, "Write spec");
        assert_eq!(priority.as_deref(), Some("high"));
        assert_eq!(due.as_deref(), Some("2026-11-01"));
        assert_eq!(status.as_deref(), Some("in-progress"));
        assert_eq!(description, None);
    }

    #[test]
    fn task_move_takes_positional_status() {
        let cli = Cli::try_parse_from(["kanban", "task", "move", "tsk-1", "done"])
            .expect("cli should parse");
        assert!(matches!(
            cli.command,
            Commands::Task {
                action: TaskCommands::Move { ref id, ref status }
            } if id == "tsk-1" && status == "done"
        ));
    }

    #[test]
    fn due_and_clear_due_conflict() {
        let parsed = Cli::try_parse_from([
            "kanban",
            "task",
            "update",
            "tsk-1",
            "--due",
            "2026-01-01",
            "--clear-due",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn chat_collects_message_words() {
        let cli = Cli::try_parse_from(["kanban", "chat", "what", "next?"])
            .expect("cli should parse");
        let Commands::Chat(args) = cli.command else {
            panic!("expected chat command");
        };
        assert_eq!(args.message, vec!["what", "next?"]);
    }

    #[test]
    fn chat_without_message_is_interactive() {
        let cli = Cli::try_parse_from(["kanban", "chat"]).expect("cli should parse");
        let Commands::Chat(args) = cli.command else {
            panic!("expected chat command");
        };
        assert!(args.message.is_empty());
    }
}
