use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

use crate::enums::{TaskPriority, TaskStatus};

/// A card on the board.
///
/// `id`, `position`, `created_at` and `updated_at` are assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    #[schemars(with = "String")]
    pub description: String,
    #[serde(default)]
    pub priority: TaskPriority,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub position: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Due date as shown on a card, e.g. `Mar 5, 2026`.
    #[must_use]
    pub fn due_label(&self) -> Option<String> {
        self.due_date.map(|d| d.format("%b %-d, %Y").to_string())
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn reads_store_row_with_null_description() {
        let json = r#"{
            "id": "7d1c",
            "title": "Write spec",
            "description": null,
            "priority": "high",
            "due_date": "2026-03-05",
            "status": "todo",
            "position": 0,
            "created_at": "2026-02-09T14:30:00.123456+00:00",
            "updated_at": "2026-02-09T14:30:00.123456+00:00"
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.description, "");
        assert_eq!(task.priority, TaskPriority::High);
        assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2026, 3, 5));
        assert_eq!(task.due_label().as_deref(), Some("Mar 5, 2026"));
    }

    #[test]
    fn due_label_absent_without_date() {
        let task = Task {
            id: "tsk-1".into(),
            title: "t".into(),
            description: String::new(),
            priority: TaskPriority::Low,
            due_date: None,
            status: TaskStatus::Done,
            position: 3,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert_eq!(task.due_label(), None);
    }
}
