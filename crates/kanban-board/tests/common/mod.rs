//! In-memory fakes for the board's collaborators.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use futures::StreamExt;
use chrono::{TimeZone, Utc};
use kanban_board::{Notice, Notifier};
use kanban_core::entities::Task;
use kanban_core::{
    ChatBackend, ChatMessage, ChunkStream, StoreError, StreamError, TaskDraft, TaskStore,
    TaskUpdate,
};

/// A `TaskStore` over a `Vec`, with switchable failures and a call log.
#[derive(Default)]
pub struct FakeStore {
    tasks: Mutex<Vec<Task>>,
    next_id: AtomicUsize,
    pub fail_list: AtomicBool,
    pub fail_create: AtomicBool,
    pub fail_update: AtomicBool,
    pub fail_delete: AtomicBool,
    calls: Mutex<Vec<String>>,
}

impl FakeStore {
    pub fn with_tasks(titles: &[&str]) -> Self {
        let store = Self::default();
        for title in titles {
            store.insert(&TaskDraft::new(*title));
        }
        store
    }

    fn insert(&self, draft: &TaskDraft) -> Task {
        let n = self.next_id.fetch_add(1, Ordering::SeqCst);
        let mut tasks = self.tasks.lock().unwrap();
        let position = tasks.iter().map(|t| t.position + 1).max().unwrap_or(0);
        let stamp = Utc.with_ymd_and_hms(2026, 10, 1, 9, 0, 0).unwrap();
        let task = Task {
            id: format!("t{n}"),
            title: draft.title.clone(),
            description: draft.description.clone(),
            priority: draft.priority,
            due_date: draft.due_date,
            status: draft.status,
            position,
            created_at: stamp,
            updated_at: stamp,
        };
        tasks.push(task.clone());
        task
    }

    pub fn set(&self, flag: &AtomicBool, value: bool) {
        flag.store(value, Ordering::SeqCst);
    }

    /// Tasks as the store holds them.
    pub fn snapshot(&self) -> Vec<Task> {
        self.tasks.lock().unwrap().clone()
    }

    /// Change the stored record without the board knowing.
    pub fn edit_behind_the_board(&self, id: &str, update: &TaskUpdate) {
        let mut tasks = self.tasks.lock().unwrap();
        if let Some(task) = tasks.iter_mut().find(|t| t.id == id) {
            update.apply_to(task);
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }

    fn unavailable() -> StoreError {
        StoreError::Unavailable("connection refused".into())
    }
}

#[async_trait]
impl TaskStore for FakeStore {
    async fn list(&self) -> Result<Vec<Task>, StoreError> {
        self.record("list");
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(Self::unavailable());
        }
        let mut tasks = self.snapshot();
        tasks.sort_by_key(|t| t.position);
        Ok(tasks)
    }

    async fn create(&self, draft: &TaskDraft) -> Result<Task, StoreError> {
        self.record(format!("create {}", draft.title));
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(Self::unavailable());
        }
        Ok(self.insert(draft))
    }

    async fn update(&self, id: &str, update: &TaskUpdate) -> Result<Task, StoreError> {
        self.record(format!("update {id}"));
        if self.fail_update.load(Ordering::SeqCst) {
            return Err(Self::unavailable());
        }
        let mut tasks = self.tasks.lock().unwrap();
        let task = tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })?;
        update.apply_to(task);
        task.updated_at = Utc.with_ymd_and_hms(2026, 10, 2, 9, 0, 0).unwrap();
        Ok(task.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.record(format!("delete {id}"));
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(Self::unavailable());
        }
        self.tasks.lock().unwrap().retain(|t| t.id != id);
        Ok(())
    }
}

/// Reads pass through to a [`FakeStore`]; writes never complete.
pub struct StalledStore {
    pub inner: FakeStore,
    writes: AtomicUsize,
}

impl StalledStore {
    pub fn new(inner: FakeStore) -> Self {
        Self {
            inner,
            writes: AtomicUsize::new(0),
        }
    }

    /// Writes that reached the store and are still waiting.
    pub fn writes_started(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    async fn stall<T>(&self) -> Result<T, StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        std::future::pending().await
    }
}

#[async_trait]
impl TaskStore for StalledStore {
    async fn list(&self) -> Result<Vec<Task>, StoreError> {
        self.inner.list().await
    }

    async fn create(&self, _draft: &TaskDraft) -> Result<Task, StoreError> {
        self.stall().await
    }

    async fn update(&self, _id: &str, _update: &TaskUpdate) -> Result<Task, StoreError> {
        self.stall().await
    }

    async fn delete(&self, _id: &str) -> Result<(), StoreError> {
        self.stall().await
    }
}

/// Keeps every notice for inspection.
#[derive(Default)]
pub struct RecordingNotifier(Mutex<Vec<Notice>>);

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.0
            .lock()
            .unwrap()
            .iter()
            .map(|n| n.message.clone())
            .collect()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.0.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.0.lock().unwrap().push(notice);
    }
}

pub type SharedNotifier = Arc<RecordingNotifier>;

/// What a scripted backend does for one turn.
pub enum Turn {
    /// The request is refused before any chunk.
    Refuse(StreamError),
    /// The reply streams these items in order.
    Reply(Vec<Result<String, StreamError>>),
}

impl Turn {
    pub fn chunks(parts: &[&str]) -> Self {
        Self::Reply(parts.iter().map(|p| Ok((*p).to_string())).collect())
    }
}

/// A `ChatBackend` that plays back one scripted turn per call.
#[derive(Default)]
pub struct ScriptedBackend {
    turns: Mutex<VecDeque<Turn>>,
    seen: Mutex<Vec<Vec<ChatMessage>>>,
}

impl ScriptedBackend {
    pub fn new(turns: Vec<Turn>) -> Self {
        Self {
            turns: Mutex::new(turns.into()),
            seen: Mutex::default(),
        }
    }

    /// The history sent on each call.
    pub fn seen(&self) -> Vec<Vec<ChatMessage>> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatBackend for ScriptedBackend {
    async fn stream_chat(&self, messages: &[ChatMessage]) -> Result<ChunkStream, StreamError> {
        self.seen.lock().unwrap().push(messages.to_vec());
        let turn = self
            .turns
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Turn::Reply(Vec::new()));
        match turn {
            Turn::Refuse(err) => Err(err),
            Turn::Reply(items) => Ok(futures::stream::iter(items).boxed()),
        }
    }
}
