//! # kanban-db
//!
//! libSQL-backed task store for the kanban board.
//!
//! The whole board lives in one `tasks` table. [`KanbanDb`] owns the
//! connection, runs the embedded migrations on open, and implements
//! [`kanban_core::TaskStore`] so the board controller can use it directly.
//!
//! Uses the `libsql` crate (C `SQLite` fork, v0.9.29) in local-only mode;
//! `:memory:` opens a throwaway database for tests.

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
mod store;

#[cfg(test)]
mod test_support;

use error::DatabaseError;
use libsql::Builder;

/// Prefix for locally generated task ids (`tsk-a3f8b2c1`).
pub const PREFIX_TASK: &str = "tsk";

/// Database handle for the board.
pub struct KanbanDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl KanbanDb {
    /// Open a local database at the given path.
    ///
    /// Runs migrations automatically on every open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        let kanban_db = Self { db, conn };
        kanban_db.run_migrations().await?;
        tracing::debug!(path, "opened task database");
        Ok(kanban_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Generate a prefixed ID via libSQL. Returns e.g., `"tsk-a3f8b2c1"`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or returns no rows.
    pub async fn generate_id(&self, prefix: &str) -> Result<String, DatabaseError> {
        let mut rows = self
            .conn
            .query(
                &format!("SELECT '{prefix}-' || lower(hex(randomblob(4)))"),
                (),
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<String>(0)?)
    }
}
