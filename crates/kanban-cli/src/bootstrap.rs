use std::path::Path;

use anyhow::Context;
use kanban_config::KanbanConfig;

/// Load `.env` from the project root (falling back to the working directory),
/// then the layered config with the project file under `project_root`.
pub fn load_config(project_root: &Path) -> anyhow::Result<KanbanConfig> {
    load_project_dotenv(project_root)?;
    KanbanConfig::load_for(project_root).context("failed to load kanban configuration")
}

fn load_project_dotenv(project_root: &Path) -> anyhow::Result<()> {
    let env_path = project_root.join(".env");
    if env_path.exists() {
        dotenvy::from_path(&env_path)
            .with_context(|| format!("failed to load dotenv file at {}", env_path.display()))?;
        return Ok(());
    }

    dotenvy::dotenv().ok();
    Ok(())
}
