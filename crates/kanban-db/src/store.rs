//! [`TaskStore`] over the local database.

use async_trait::async_trait;
use kanban_core::entities::Task;
use kanban_core::{StoreError, TaskDraft, TaskStore, TaskUpdate};

use crate::KanbanDb;
use crate::error::DatabaseError;

#[async_trait]
impl TaskStore for KanbanDb {
    async fn list(&self) -> Result<Vec<Task>, StoreError> {
        let tasks = self.list_tasks().await?;
        tracing::debug!(count = tasks.len(), "listed tasks");
        Ok(tasks)
    }

    async fn create(&self, draft: &TaskDraft) -> Result<Task, StoreError> {
        let task = self.create_task(draft).await?;
        tracing::debug!(id = %task.id, position = task.position, "created task");
        Ok(task)
    }

    async fn update(&self, id: &str, update: &TaskUpdate) -> Result<Task, StoreError> {
        match self.update_task(id, update).await {
            Ok(task) => {
                tracing::debug!(id, "updated task");
                Ok(task)
            }
            Err(DatabaseError::NoResult) => Err(StoreError::NotFound { id: id.to_string() }),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.delete_task(id).await?;
        tracing::debug!(id, "deleted task");
        Ok(())
    }
}
