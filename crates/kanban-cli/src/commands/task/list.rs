use kanban_core::enums::TaskStatus;

use crate::cli::GlobalFlags;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    status: Option<&str>,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let status = status
        .map(|raw| parse_enum::<TaskStatus>(raw, "status"))
        .transpose()?;

    let tasks = ctx.board.load_all().await?;
    let tasks = tasks
        .iter()
        .filter(|task| status.is_none_or(|status| task.status == status))
        .collect::<Vec<_>>();

    output(tasks.as_slice(), flags.format)
}
