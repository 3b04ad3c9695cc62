use crate::cli::GlobalFlags;
use crate::cli::subcommands::TaskCommands;
use crate::context::AppContext;

#[path = "task/add.rs"]
mod add;
#[path = "task/delete.rs"]
mod delete;
#[path = "task/list.rs"]
mod list;
#[path = "task/move_task.rs"]
mod move_task;
#[path = "task/update.rs"]
mod update;

/// Handle `kanban task`.
pub async fn handle(
    action: &TaskCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        TaskCommands::List { status } => list::run(status.as_deref(), ctx, flags).await,
        TaskCommands::Add {
            title,
            description,
            priority,
            due,
            status,
        } => {
            add::run(
                &add::Params {
                    title,
                    description: description.as_deref(),
                    priority: priority.as_deref(),
                    due: due.as_deref(),
                    status: status.as_deref(),
                },
                ctx,
                flags,
            )
            .await
        }
        TaskCommands::Move { id, status } => move_task::run(id, status, ctx, flags).await,
        TaskCommands::Update {
            id,
            title,
            description,
            priority,
            due,
            clear_due,
            status,
            position,
        } => {
            update::run(
                id,
                &update::Params {
                    title: title.as_deref(),
                    description: description.as_deref(),
                    priority: priority.as_deref(),
                    due: due.as_deref(),
                    clear_due: *clear_due,
                    status: status.as_deref(),
                    position: *position,
                },
                ctx,
                flags,
            )
            .await
        }
        TaskCommands::Delete { id } => delete::run(id, ctx, flags).await,
    }
}
