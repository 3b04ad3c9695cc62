//! The task store seam.
//!
//! The board controller only talks to a `TaskStore`. `kanban-db` implements it
//! over an embedded libSQL database and `kanban-remote` over PostgREST; tests
//! implement it with in-memory fakes.

use async_trait::async_trait;

use crate::draft::TaskDraft;
use crate::entities::Task;
use crate::enums::TaskStatus;
use crate::errors::StoreError;
use crate::updates::TaskUpdate;

/// CRUD over the system of record for tasks.
///
/// Implementations do not retry; every failure is returned to the caller as-is.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// All tasks, ordered by `position` ascending.
    async fn list(&self) -> Result<Vec<Task>, StoreError>;

    /// Persist a new task and return the canonical record.
    async fn create(&self, draft: &TaskDraft) -> Result<Task, StoreError>;

    /// Apply a partial update and return the canonical record.
    async fn update(&self, id: &str, update: &TaskUpdate) -> Result<Task, StoreError>;

    /// Remove a task. Deleting an unknown id is not an error.
    async fn delete(&self, id: &str) -> Result<(), StoreError>;

    /// Change only the status of a task.
    async fn move_to(&self, id: &str, status: TaskStatus) -> Result<Task, StoreError> {
        self.update(id, &TaskUpdate::status(status)).await
    }
}

#[async_trait]
impl<T: TaskStore + ?Sized> TaskStore for Box<T> {
    async fn list(&self) -> Result<Vec<Task>, StoreError> {
        (**self).list().await
    }

    async fn create(&self, draft: &TaskDraft) -> Result<Task, StoreError> {
        (**self).create(draft).await
    }

    async fn update(&self, id: &str, update: &TaskUpdate) -> Result<Task, StoreError> {
        (**self).update(id, update).await
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        (**self).delete(id).await
    }

    async fn move_to(&self, id: &str, status: TaskStatus) -> Result<Task, StoreError> {
        (**self).move_to(id, status).await
    }
}

#[async_trait]
impl<T: TaskStore + ?Sized> TaskStore for std::sync::Arc<T> {
    async fn list(&self) -> Result<Vec<Task>, StoreError> {
        (**self).list().await
    }

    async fn create(&self, draft: &TaskDraft) -> Result<Task, StoreError> {
        (**self).create(draft).await
    }

    async fn update(&self, id: &str, update: &TaskUpdate) -> Result<Task, StoreError> {
        (**self).update(id, update).await
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        (**self).delete(id).await
    }

    async fn move_to(&self, id: &str, status: TaskStatus) -> Result<Task, StoreError> {
        (**self).move_to(id, status).await
    }
}
