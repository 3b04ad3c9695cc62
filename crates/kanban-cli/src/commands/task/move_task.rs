use anyhow::Context;
use kanban_core::enums::TaskStatus;

use crate::cli::GlobalFlags;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    id: &str,
    status: &str,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let status = parse_enum::<TaskStatus>(status, "status")?;

    ctx.board.load_all().await?;
    ctx.board.move_task(id, status).await?;

    let task = ctx
        .board
        .task(id)
        .with_context(|| format!("task {id} is not on the board"))?;
    output(task, flags.format)
}
