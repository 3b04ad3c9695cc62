use anyhow::bail;
use kanban_core::TaskDraft;
use kanban_core::enums::{TaskPriority, TaskStatus};

use crate::cli::GlobalFlags;
use crate::commands::shared::parse::{parse_date, parse_enum};
use crate::context::AppContext;
use crate::output::output;

pub struct Params<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub priority: Option<&'a str>,
    pub due: Option<&'a str>,
    pub status: Option<&'a str>,
}

pub async fn run(params: &Params<'_>, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let draft = build_draft(params)?;
    draft.validate()?;
    let Some(task) = ctx.board.add_task(draft).await? else {
        bail!("task was not created");
    };
    output(&task, flags.format)
}

fn build_draft(params: &Params<'_>) -> anyhow::Result<TaskDraft> {
    let mut draft = TaskDraft::new(params.title);
    if let Some(description) = params.description {
        draft = draft.description(description);
    }
    if let Some(priority) = params.priority {
        draft = draft.priority(parse_enum::<TaskPriority>(priority, "priority")?);
    }
    if let Some(due) = params.due {
        draft = draft.due_date(Some(parse_date(due, "due")?));
    }
    if let Some(status) = params.status {
        draft = draft.status(parse_enum::<TaskStatus>(status, "status")?);
    }
    Ok(draft)
}
