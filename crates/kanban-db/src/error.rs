//! Database error types for kanban-db.

use kanban_core::StoreError;
use thiserror::Error;

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A SQL query failed.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),
}

impl DatabaseError {
    /// Whether SQLite refused the write because of a CHECK/UNIQUE/NOT NULL rule.
    #[must_use]
    pub fn is_constraint_violation(&self) -> bool {
        matches!(self, Self::LibSql(e) if e.to_string().contains("constraint failed"))
    }
}

impl From<DatabaseError> for StoreError {
    fn from(error: DatabaseError) -> Self {
        if error.is_constraint_violation() {
            return Self::Constraint(error.to_string());
        }
        match error {
            DatabaseError::Query(message) => Self::Decode(message),
            other => Self::Unavailable(other.to_string()),
        }
    }
}
