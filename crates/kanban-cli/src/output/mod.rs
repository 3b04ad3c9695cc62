use serde::Serialize;

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;
mod views;

/// A response with a table form.
pub trait Tabular {
    fn headers(&self) -> Vec<&'static str>;

    fn rows(&self) -> Vec<Vec<String>>;

    /// Printed instead of a table with no rows.
    fn empty_text(&self) -> &'static str {
        "(nothing to show)"
    }
}

/// Render a response to a string in the requested format.
pub fn render<T>(value: &T, format: OutputFormat) -> anyhow::Result<String>
where
    T: Serialize + Tabular + ?Sized,
{
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
        OutputFormat::Table => Ok(render_tabular(value)),
    }
}

/// Print a response in the requested format.
pub fn output<T>(value: &T, format: OutputFormat) -> anyhow::Result<()>
where
    T: Serialize + Tabular + ?Sized,
{
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

/// Print a response that only has a JSON form. Table mode prints it pretty.
pub fn output_json<T: Serialize + ?Sized>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = if format == OutputFormat::Raw {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    println!("{rendered}");
    Ok(())
}

fn render_tabular<T: Tabular + ?Sized>(value: &T) -> String {
    let rows = value.rows();
    if rows.is_empty() {
        return value.empty_text().to_string();
    }
    let prefs = ui::prefs();
    table::render_table(
        &value.headers(),
        &rows,
        table::TableOptions {
            max_width: prefs.term_width,
            color: prefs.table_color,
        },
    )
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone, Utc};
    use kanban_core::Task;
    use kanban_core::enums::{TaskPriority, TaskStatus};

    use super::render;
    use crate::cli::OutputFormat;

    fn task(id: &str, title: &str, status: TaskStatus) -> Task {
        let at = Utc.with_ymd_and_hms(2026, 10, 1, 9, 30, 0).unwrap();
        Task {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            priority: TaskPriority::High,
            due_date: NaiveDate::from_ymd_opt(2026, 11, 1),
            status,
            position: 0,
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn json_render_is_valid_json() {
        let task = task("t0", "Write spec", TaskStatus::Todo);
        let out = render(&task, OutputFormat::Json).expect("json render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["id"], "t0");
        assert_eq!(parsed["due_date"], "2026-11-01");
    }

    #[test]
    fn raw_render_is_single_line_json() {
        let tasks = [task("t0", "Write spec", TaskStatus::Todo)];
        let refs: Vec<&Task> = tasks.iter().collect();
        let out = render(refs.as_slice(), OutputFormat::Raw).expect("raw render should work");
        assert!(!out.contains('\n'));
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed[0]["title"], "Write spec");
    }

    #[test]
    fn task_list_table_shows_card_columns() {
        let tasks = [
            task("t0", "Write spec", TaskStatus::Todo),
            task("t1", "Review", TaskStatus::Done),
        ];
        let refs: Vec<&Task> = tasks.iter().collect();
        let out = render(refs.as_slice(), OutputFormat::Table).expect("table render should work");
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 4);
        let header = lines[0];
        let id_at = header.find("id").expect("id column");
        let title_at = header.find("title").expect("title column");
        let due_at = header.find("due").expect("due column");
        assert!(id_at < title_at && title_at < due_at);
        assert!(lines[2].contains("Nov 1, 2026"));
        assert!(lines[3].contains("done"));
    }

    #[test]
    fn empty_task_list_renders_placeholder() {
        let refs: Vec<&Task> = Vec::new();
        let out = render(refs.as_slice(), OutputFormat::Table).expect("table render should work");
        assert_eq!(out, "(no tasks)");
    }

    #[test]
    fn single_task_table_lists_fields() {
        let task = task("t0", "Write spec", TaskStatus::InProgress);
        let out = render(&task, OutputFormat::Table).expect("table render should work");
        assert!(out.lines().next().is_some_and(|line| line.starts_with("field")));
        assert!(out.contains("in_progress"));
        assert!(out.contains("2026-10-01 09:30"));
    }
}
