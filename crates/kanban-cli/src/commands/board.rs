use kanban_core::Task;
use kanban_core::enums::TaskStatus;
use serde::Serialize;

use crate::cli::{GlobalFlags, OutputFormat};
use crate::context::{AppContext, Board};
use crate::output::{output, output_json};

#[derive(Debug, Serialize)]
struct BoardView<'a> {
    summary: String,
    columns: Vec<ColumnView<'a>>,
}

#[derive(Debug, Serialize)]
struct ColumnView<'a> {
    status: TaskStatus,
    label: &'static str,
    count: usize,
    tasks: Vec<&'a Task>,
}

/// Handle `kanban board`.
pub async fn handle(ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.board.load_all().await?;
    tracing::debug!(root = %ctx.project_root.display(), tasks = ctx.board.len(), "board loaded");
    let view = board_view(&ctx.board);

    if flags.format != OutputFormat::Table {
        return output_json(&view, flags.format);
    }

    println!("{}", view.summary);
    for column in &view.columns {
        println!();
        println!("{} ({})", column.label, column.count);
        output(column.tasks.as_slice(), flags.format)?;
    }
    Ok(())
}

fn board_view(board: &Board) -> BoardView<'_> {
    let columns = board
        .columns()
        .into_iter()
        .map(|(status, tasks)| ColumnView {
            status,
            label: status.label(),
            count: tasks.len(),
            tasks,
        })
        .collect();
    BoardView {
        summary: board.summary(),
        columns,
    }
}

#[cfg(test)]
mod tests {
    use kanban_core::enums::TaskStatus;
    use kanban_core::{TaskDraft, TaskStore};
    use kanban_db::KanbanDb;

    use super::board_view;
    use crate::context::{Board, ConsoleNotifier};

    #[tokio::test]
    async fn board_view_groups_columns_in_order() {
        let db = KanbanDb::open_local(":memory:").await.expect("db");
        db.create(&TaskDraft::new("Write spec")).await.expect("create");
        db.create(&TaskDraft::new("Ship").status(TaskStatus::Done))
            .await
            .expect("create");

        let store: Box<dyn TaskStore> = Box::new(db);
        let mut board: Board = Board::new(store, ConsoleNotifier::new(true));
        board.load_all().await.expect("load");

        let view = board_view(&board);
        let json = serde_json::to_value(&view).expect("serialize");
        assert_eq!(json["summary"], "2 tasks");
        assert_eq!(json["columns"][0]["status"], "todo");
        assert_eq!(json["columns"][0]["label"], "To Do");
        assert_eq!(json["columns"][0]["count"], 1);
        assert_eq!(json["columns"][1]["count"], 0);
        assert_eq!(json["columns"][2]["tasks"][0]["title"], "Ship");
    }
}
