use anyhow::bail;
use kanban_core::{ChatMessage, Task, TaskDraft};
use schemars::schema_for;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SchemaArgs;
use crate::output::output_json;

/// Handle `kanban schema`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let schema = schema_json(&args.type_name)?;
    output_json(&schema, flags.format)
}

fn schema_json(type_name: &str) -> anyhow::Result<serde_json::Value> {
    let schema = match type_name {
        "task" => schema_for!(Task),
        "draft" | "task-draft" | "task_draft" => schema_for!(TaskDraft),
        "message" | "chat-message" | "chat_message" => schema_for!(ChatMessage),
        other => bail!("unknown schema type '{other}' (expected task, draft or message)"),
    };
    Ok(serde_json::to_value(schema)?)
}
