//! Board state controller.
//!
//! Holds the in-memory task collection shown on the board and keeps it in
//! step with a [`TaskStore`]. Moves, deletes and edits are applied locally
//! before the store call returns; when the store refuses one, the whole
//! collection is reloaded from the store. Adds wait for the store's canonical
//! record before anything is shown.

use kanban_core::entities::Task;
use kanban_core::enums::TaskStatus;
use kanban_core::{StoreError, TaskDraft, TaskStore, TaskUpdate};
use thiserror::Error;

use crate::notify::{Notice, Notifier};

pub const MSG_LOAD_FAILED: &str = "Failed to load tasks";
pub const MSG_CREATED: &str = "Task created";
pub const MSG_CREATE_FAILED: &str = "Failed to create task";
pub const MSG_MOVE_FAILED: &str = "Failed to move task";
pub const MSG_DELETED: &str = "Task deleted";
pub const MSG_DELETE_FAILED: &str = "Failed to delete task";
pub const MSG_UPDATE_FAILED: &str = "Failed to update task";

/// A board operation failed at the store.
#[derive(Debug, Error)]
pub enum BoardError {
    #[error("Failed to load tasks")]
    Load(#[source] StoreError),

    #[error("Failed to create task")]
    Create(#[source] StoreError),

    #[error("Failed to move task {id}")]
    Move {
        id: String,
        #[source]
        source: StoreError,
    },

    #[error("Failed to delete task {id}")]
    Delete {
        id: String,
        #[source]
        source: StoreError,
    },

    #[error("Failed to update task {id}")]
    Update {
        id: String,
        #[source]
        source: StoreError,
    },
}

impl BoardError {
    /// The store failure behind this error.
    #[must_use]
    pub const fn store_error(&self) -> &StoreError {
        match self {
            Self::Load(source) | Self::Create(source) => source,
            Self::Move { source, .. } | Self::Delete { source, .. } | Self::Update { source, .. } => {
                source
            }
        }
    }
}

pub struct BoardController<S, N> {
    store: S,
    notifier: N,
    tasks: Vec<Task>,
    loading: bool,
}

impl<S: TaskStore, N: Notifier> BoardController<S, N> {
    /// An empty board that has not loaded yet.
    pub const fn new(store: S, notifier: N) -> Self {
        Self {
            store,
            notifier,
            tasks: Vec::new(),
            loading: true,
        }
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Replace the collection with the store's current contents.
    ///
    /// On failure the collection is left as it was.
    pub async fn load_all(&mut self) -> Result<&[Task], BoardError> {
        let result = self.store.list().await;
        self.loading = false;
        match result {
            Ok(tasks) => {
                tracing::debug!(count = tasks.len(), "board loaded");
                self.tasks = tasks;
                Ok(self.tasks.as_slice())
            }
            Err(e) => {
                tracing::warn!(error = %e, "loading board failed");
                self.notifier.notify(Notice::error(MSG_LOAD_FAILED));
                Err(BoardError::Load(e))
            }
        }
    }

    /// Create a task from `draft` and append the stored record.
    ///
    /// Title and description are trimmed first. A blank title is ignored:
    /// nothing is sent and `Ok(None)` is returned.
    pub async fn add_task(&mut self, draft: TaskDraft) -> Result<Option<Task>, BoardError> {
        let draft = draft.normalized();
        if draft.is_blank() {
            tracing::debug!("ignoring task with blank title");
            return Ok(None);
        }

        match self.store.create(&draft).await {
            Ok(task) => {
                self.tasks.push(task.clone());
                self.notifier.notify(Notice::success(MSG_CREATED));
                Ok(Some(task))
            }
            Err(e) => {
                tracing::warn!(error = %e, "creating task failed");
                self.notifier.notify(Notice::error(MSG_CREATE_FAILED));
                Err(BoardError::Create(e))
            }
        }
    }

    /// Move a task to another column.
    ///
    /// The local status changes immediately. If the store refuses, the board
    /// is reloaded, which also discards any other unconfirmed local changes.
    pub async fn move_task(&mut self, id: &str, status: TaskStatus) -> Result<(), BoardError> {
        if let Some(task) = self.find_mut(id) {
            task.status = status;
        }

        match self.store.move_to(id, status).await {
            Ok(canonical) => {
                self.replace(canonical);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(id, %status, error = %e, "moving task failed");
                self.notifier.notify(Notice::error(MSG_MOVE_FAILED));
                self.recover().await;
                Err(BoardError::Move {
                    id: id.to_string(),
                    source: e,
                })
            }
        }
    }

    /// Remove a task. The local removal happens before the store call.
    pub async fn delete_task(&mut self, id: &str) -> Result<(), BoardError> {
        self.tasks.retain(|t| t.id != id);

        match self.store.delete(id).await {
            Ok(()) => {
                self.notifier.notify(Notice::success(MSG_DELETED));
                Ok(())
            }
            Err(e) => {
                tracing::warn!(id, error = %e, "deleting task failed");
                self.notifier.notify(Notice::error(MSG_DELETE_FAILED));
                self.recover().await;
                Err(BoardError::Delete {
                    id: id.to_string(),
                    source: e,
                })
            }
        }
    }

    /// Apply a partial edit, optimistically. An empty update does nothing.
    pub async fn update_task(&mut self, id: &str, update: &TaskUpdate) -> Result<(), BoardError> {
        if update.is_empty() {
            return Ok(());
        }
        if let Some(task) = self.find_mut(id) {
            update.apply_to(task);
        }

        match self.store.update(id, update).await {
            Ok(canonical) => {
                self.replace(canonical);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(id, error = %e, "updating task failed");
                self.notifier.notify(Notice::error(MSG_UPDATE_FAILED));
                self.recover().await;
                Err(BoardError::Update {
                    id: id.to_string(),
                    source: e,
                })
            }
        }
    }

    /// Full reload after a refused mutation. A failed reload keeps the
    /// current collection.
    async fn recover(&mut self) {
        if self.load_all().await.is_err() {
            tracing::warn!("reload after failed mutation also failed; keeping local state");
        }
    }

    fn find_mut(&mut self, id: &str) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    /// Swap in the store's record if the task is still on the board.
    fn replace(&mut self, canonical: Task) {
        if let Some(task) = self.find_mut(&canonical.id) {
            *task = canonical;
        }
    }

    // -- views --------------------------------------------------------------

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Tasks in one column, in board order.
    pub fn tasks_by_status(&self, status: TaskStatus) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.status == status).collect()
    }

    /// All three columns in display order.
    pub fn columns(&self) -> Vec<(TaskStatus, Vec<&Task>)> {
        TaskStatus::ALL
            .iter()
            .map(|&status| (status, self.tasks_by_status(status)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// True until the first load settles.
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Header count, e.g. "1 task" or "3 tasks".
    pub fn summary(&self) -> String {
        match self.tasks.len() {
            1 => "1 task".to_string(),
            n => format!("{n} tasks"),
        }
    }
}
