//! Shared test utilities for kanban-db unit tests.

use kanban_core::TaskDraft;
use kanban_core::entities::Task;

use crate::KanbanDb;

/// Open a fresh in-memory database.
pub async fn test_db() -> KanbanDb {
    KanbanDb::open_local(":memory:").await.unwrap()
}

/// Create a task with default fields and the given title.
pub async fn seed_task(db: &KanbanDb, title: &str) -> Task {
    db.create_task(&TaskDraft::new(title)).await.unwrap()
}
