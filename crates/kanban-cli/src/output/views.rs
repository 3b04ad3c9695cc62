use kanban_core::{ChatMessage, Task};

use super::Tabular;

const CARD_HEADERS: [&str; 5] = ["id", "title", "priority", "due", "status"];
const TIMESTAMP: &str = "%Y-%m-%d %H:%M";

fn due_cell(task: &Task) -> String {
    task.due_label().unwrap_or_else(|| "-".to_string())
}

/// Task lists print as board cards, one row each.
impl Tabular for [&Task] {
    fn headers(&self) -> Vec<&'static str> {
        CARD_HEADERS.to_vec()
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.iter()
            .map(|task| {
                vec![
                    task.id.clone(),
                    task.title.clone(),
                    task.priority.as_str().to_string(),
                    due_cell(task),
                    task.status.as_str().to_string(),
                ]
            })
            .collect()
    }

    fn empty_text(&self) -> &'static str {
        "(no tasks)"
    }
}

/// A single task prints every field, one per row.
impl Tabular for Task {
    fn headers(&self) -> Vec<&'static str> {
        vec!["field", "value"]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        let description = if self.description.is_empty() {
            "-".to_string()
        } else {
            self.description.clone()
        };
        [
            ("id", self.id.clone()),
            ("title", self.title.clone()),
            ("description", description),
            ("priority", self.priority.as_str().to_string()),
            ("due", due_cell(self)),
            ("status", self.status.as_str().to_string()),
            ("position", self.position.to_string()),
            ("created", self.created_at.format(TIMESTAMP).to_string()),
            ("updated", self.updated_at.format(TIMESTAMP).to_string()),
        ]
        .into_iter()
        .map(|(field, value)| vec![field.to_string(), value])
        .collect()
    }
}

impl Tabular for [ChatMessage] {
    fn headers(&self) -> Vec<&'static str> {
        vec!["role", "content"]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.iter()
            .map(|m| vec![m.role.as_str().to_string(), m.content.clone()])
            .collect()
    }

    fn empty_text(&self) -> &'static str {
        "(no messages)"
    }
}
