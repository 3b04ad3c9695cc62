use anyhow::Context;
use clap::Parser;

mod bootstrap;
mod cli;
mod commands;
mod context;
mod output;
mod ui;

use cli::OutputFormat;
use commands::shared::parse::parse_enum;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("kanban error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    if let cli::Commands::Schema(args) = &cli.command {
        let flags = cli.global_flags(OutputFormat::Json);
        ui::init(&flags);
        return commands::schema::handle(args, &flags);
    }

    let project_root = context::resolve_project_root(cli.project.as_deref())?;
    let config = bootstrap::load_config(&project_root)?;

    let default_format: OutputFormat =
        parse_enum(&config.general.default_format, "general.default_format")?;
    let flags = cli.global_flags(default_format);
    ui::init(&flags);

    let mut ctx = context::AppContext::init(project_root, config, &flags)
        .await
        .context("failed to initialize kanban application context")?;

    commands::dispatch::dispatch(cli.command, &mut ctx, &flags).await
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("KANBAN_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
