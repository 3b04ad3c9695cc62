//! Task repository: ordered listing, create, partial update, delete.

use chrono::Utc;

use kanban_core::TaskDraft;
use kanban_core::TaskUpdate;
use kanban_core::entities::Task;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, parse_datetime, parse_enum, parse_optional_date};
use crate::{KanbanDb, PREFIX_TASK};

const SELECT_COLS: &str =
    "id, title, description, priority, due_date, status, position, created_at, updated_at";

fn row_to_task(row: &libsql::Row) -> Result<Task, DatabaseError> {
    Ok(Task {
        id: row.get(0)?,
        title: row.get(1)?,
        description: get_opt_string(row, 2)?.unwrap_or_default(),
        priority: parse_enum(&row.get::<String>(3)?)?,
        due_date: parse_optional_date(get_opt_string(row, 4)?.as_deref())?,
        status: parse_enum(&row.get::<String>(5)?)?,
        position: row.get::<i64>(6)?,
        created_at: parse_datetime(&row.get::<String>(7)?)?,
        updated_at: parse_datetime(&row.get::<String>(8)?)?,
    })
}

impl KanbanDb {
    /// Insert a task at the end of the board.
    ///
    /// Position is one past the current maximum (0 for the first task),
    /// computed inside the INSERT so it cannot race another create on the
    /// same connection.
    pub async fn create_task(&self, draft: &TaskDraft) -> Result<Task, DatabaseError> {
        let now = Utc::now();
        let id = self.generate_id(PREFIX_TASK).await?;
        let due_date = draft.due_date.map(|d| d.format("%Y-%m-%d").to_string());

        self.conn()
            .execute(
                &format!(
                    "INSERT INTO tasks ({SELECT_COLS})
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6,
                             (SELECT COALESCE(MAX(position) + 1, 0) FROM tasks),
                             ?7, ?8)"
                ),
                libsql::params![
                    id.as_str(),
                    draft.title.as_str(),
                    draft.description.as_str(),
                    draft.priority.as_str(),
                    due_date,
                    draft.status.as_str(),
                    now.to_rfc3339(),
                    now.to_rfc3339()
                ],
            )
            .await?;

        self.get_task(&id).await
    }

    pub async fn get_task(&self, id: &str) -> Result<Task, DatabaseError> {
        let mut rows = self
            .conn()
            .query(&format!("SELECT {SELECT_COLS} FROM tasks WHERE id = ?1"), [id])
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_task(&row)
    }

    /// Apply the set fields of `update` and bump `updated_at`.
    ///
    /// Returns `DatabaseError::NoResult` when no row has this id. An empty
    /// update leaves the row (and its `updated_at`) untouched.
    pub async fn update_task(
        &self,
        task_id: &str,
        update: &TaskUpdate,
    ) -> Result<Task, DatabaseError> {
        let mut sets = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();
        let mut idx = 1usize;

        if let Some(ref title) = update.title {
            sets.push(format!("title = ?{idx}"));
            params.push(title.clone().into());
            idx += 1;
        }
        if let Some(ref description) = update.description {
            sets.push(format!("description = ?{idx}"));
            params.push(description.clone().into());
            idx += 1;
        }
        if let Some(priority) = update.priority {
            sets.push(format!("priority = ?{idx}"));
            params.push(priority.as_str().into());
            idx += 1;
        }
        if let Some(due_date) = update.due_date {
            sets.push(format!("due_date = ?{idx}"));
            params.push(due_date.map_or(libsql::Value::Null, |d| {
                d.format("%Y-%m-%d").to_string().into()
            }));
            idx += 1;
        }
        if let Some(status) = update.status {
            sets.push(format!("status = ?{idx}"));
            params.push(status.as_str().into());
            idx += 1;
        }
        if let Some(position) = update.position {
            sets.push(format!("position = ?{idx}"));
            params.push(position.into());
            idx += 1;
        }

        if sets.is_empty() {
            return self.get_task(task_id).await;
        }

        sets.push(format!("updated_at = ?{idx}"));
        params.push(Utc::now().to_rfc3339().into());
        idx += 1;

        params.push(task_id.into());
        let sql = format!("UPDATE tasks SET {} WHERE id = ?{idx}", sets.join(", "));
        let changed = self
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;
        if changed == 0 {
            return Err(DatabaseError::NoResult);
        }

        self.get_task(task_id).await
    }

    /// Delete a task. Deleting an id that does not exist is a no-op.
    pub async fn delete_task(&self, task_id: &str) -> Result<(), DatabaseError> {
        self.conn()
            .execute("DELETE FROM tasks WHERE id = ?1", [task_id])
            .await?;
        Ok(())
    }

    /// Every task, ascending by position. Ties fall back to creation time.
    pub async fn list_tasks(&self) -> Result<Vec<Task>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM tasks ORDER BY position ASC, created_at ASC"),
                (),
            )
            .await?;

        let mut tasks = Vec::new();
        while let Some(row) = rows.next().await? {
            tasks.push(row_to_task(&row)?);
        }
        Ok(tasks)
    }
}
