//! PostgREST task store.
//!
//! Talks to the `tasks` resource of a PostgREST endpoint (as exposed by a
//! hosted Postgres backend). Every request carries the anon key both as the
//! `apikey` header and as a bearer token.

use std::time::Duration;

use async_trait::async_trait;
use kanban_core::entities::Task;
use kanban_core::{StoreError, TaskDraft, TaskStore, TaskUpdate};
use serde::de::DeserializeOwned;

use crate::error::RemoteError;
use crate::http::{check_response, client_with_timeout};

const TASKS_RESOURCE: &str = "tasks";

/// [`TaskStore`] backed by a PostgREST `tasks` table.
pub struct RestTaskStore {
    http: reqwest::Client,
    rest_url: String,
    api_key: String,
}

impl RestTaskStore {
    /// Create a store for `rest_url` (the `/rest/v1` base, no trailing slash).
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::Http`] if the HTTP client cannot be built.
    pub fn new(
        rest_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, RemoteError> {
        Ok(Self {
            http: client_with_timeout(timeout)?,
            rest_url: rest_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    fn tasks_url(&self) -> String {
        format!("{}/{TASKS_RESOURCE}", self.rest_url)
    }

    fn task_url(&self, id: &str) -> String {
        format!(
            "{}?id=eq.{}",
            self.tasks_url(),
            urlencoding::encode(id)
        )
    }

    fn request(&self, method: reqwest::Method, url: &str) -> reqwest::RequestBuilder {
        self.http
            .request(method, url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    /// Send, check status, and decode a JSON body.
    async fn send_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, RemoteError> {
        let resp = check_response(request.send().await?).await?;
        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|e| RemoteError::Parse(e.to_string()))
    }

    pub async fn list_tasks(&self) -> Result<Vec<Task>, RemoteError> {
        let url = format!("{}?select=*&order=position.asc", self.tasks_url());
        self.send_json(self.request(reqwest::Method::GET, &url)).await
    }

    /// Insert one task; PostgREST answers with the inserted rows.
    pub async fn create_task(&self, draft: &TaskDraft) -> Result<Task, RemoteError> {
        let request = self
            .request(reqwest::Method::POST, &self.tasks_url())
            .header("Prefer", "return=representation")
            .json(&[draft]);
        let rows: Vec<Task> = self.send_json(request).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| RemoteError::Parse("insert returned no rows".into()))
    }

    /// Patch one task. `Ok(None)` when no row matched the id.
    pub async fn update_task(
        &self,
        id: &str,
        update: &TaskUpdate,
    ) -> Result<Option<Task>, RemoteError> {
        let request = self
            .request(reqwest::Method::PATCH, &self.task_url(id))
            .header("Prefer", "return=representation")
            .json(update);
        let rows: Vec<Task> = self.send_json(request).await?;
        Ok(rows.into_iter().next())
    }

    pub async fn delete_task(&self, id: &str) -> Result<(), RemoteError> {
        check_response(
            self.request(reqwest::Method::DELETE, &self.task_url(id))
                .send()
                .await?,
        )
        .await?;
        Ok(())
    }
}

#[async_trait]
impl TaskStore for RestTaskStore {
    async fn list(&self) -> Result<Vec<Task>, StoreError> {
        let tasks = self.list_tasks().await.inspect_err(|e| {
            tracing::warn!(error = %e, "listing remote tasks failed");
        })?;
        tracing::debug!(count = tasks.len(), "listed remote tasks");
        Ok(tasks)
    }

    async fn create(&self, draft: &TaskDraft) -> Result<Task, StoreError> {
        let task = self.create_task(draft).await?;
        tracing::debug!(id = %task.id, "created remote task");
        Ok(task)
    }

    async fn update(&self, id: &str, update: &TaskUpdate) -> Result<Task, StoreError> {
        self.update_task(id, update)
            .await?
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.delete_task(id).await?;
        tracing::debug!(id, "deleted remote task");
        Ok(())
    }
}
