use anyhow::{Context, bail};
use kanban_core::enums::{TaskPriority, TaskStatus};
use kanban_core::{TaskUpdate, TaskUpdateBuilder};

use crate::cli::GlobalFlags;
use crate::commands::shared::parse::{parse_date, parse_enum};
use crate::context::AppContext;
use crate::output::output;

pub struct Params<'a> {
    pub title: Option<&'a str>,
    pub description: Option<&'a str>,
    pub priority: Option<&'a str>,
    pub due: Option<&'a str>,
    pub clear_due: bool,
    pub status: Option<&'a str>,
    pub position: Option<i64>,
}

pub async fn run(
    id: &str,
    params: &Params<'_>,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let update = build_update(params)?;
    if update.is_empty() {
        bail!(
            "nothing to update: pass at least one of --title, --description, --priority, --due, --clear-due, --status, --position"
        );
    }

    ctx.board.load_all().await?;
    ctx.board.update_task(id, &update).await?;

    let task = ctx
        .board
        .task(id)
        .with_context(|| format!("task {id} is not on the board"))?;
    output(task, flags.format)
}

fn build_update(params: &Params<'_>) -> anyhow::Result<TaskUpdate> {
    let mut builder = TaskUpdateBuilder::new();
    if let Some(title) = params.title {
        builder = builder.title(title.trim());
    }
    if let Some(description) = params.description {
        builder = builder.description(description.trim());
    }
    if let Some(priority) = params.priority {
        builder = builder.priority(parse_enum::<TaskPriority>(priority, "priority")?);
    }
    if let Some(due) = params.due {
        builder = builder.due_date(Some(parse_date(due, "due")?));
    }
    if params.clear_due {
        builder = builder.due_date(None);
    }
    if let Some(status) = params.status {
        builder = builder.status(parse_enum::<TaskStatus>(status, "status")?);
    }
    if let Some(position) = params.position {
        builder = builder.position(position);
    }
    let update = builder.build();
    update.validate()?;
    Ok(update)
}
