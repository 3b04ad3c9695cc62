use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use kanban_board::BoardController;
use kanban_config::{KanbanConfig, StoreBackend};
use kanban_core::TaskStore;
use kanban_db::KanbanDb;
use kanban_remote::{RestTaskStore, SseChatClient};

use super::ConsoleNotifier;
use crate::cli::GlobalFlags;

/// The board as the CLI drives it.
pub type Board = BoardController<Box<dyn TaskStore>, ConsoleNotifier>;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub config: KanbanConfig,
    pub project_root: PathBuf,
    pub board: Board,
}

impl AppContext {
    /// Open the configured task store and wrap it in a board controller.
    pub async fn init(
        project_root: PathBuf,
        config: KanbanConfig,
        flags: &GlobalFlags,
    ) -> anyhow::Result<Self> {
        let store = open_store(&project_root, &config).await?;
        let board = BoardController::new(store, ConsoleNotifier::new(flags.quiet));
        Ok(Self {
            config,
            project_root,
            board,
        })
    }

    /// Build the chat client from the `[chat]` section.
    pub fn chat_backend(&self) -> anyhow::Result<SseChatClient> {
        let chat = &self.config.chat;
        if !chat.is_configured() {
            anyhow::bail!(
                "chat endpoint is not configured (set [chat] url in .kanban/config.toml or KANBAN_CHAT__URL)"
            );
        }
        let client = SseChatClient::new(chat.url.clone(), self.request_timeout())
            .context("failed to build chat client")?
            .with_api_key(chat.api_key.clone())
            .with_model(chat.model.clone());
        Ok(client)
    }

    const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.config.general.request_timeout_secs)
    }
}

async fn open_store(
    project_root: &std::path::Path,
    config: &KanbanConfig,
) -> anyhow::Result<Box<dyn TaskStore>> {
    let timeout = Duration::from_secs(config.general.request_timeout_secs);
    match config.store.backend {
        StoreBackend::Local => {
            let path = config.database_path(project_root);
            if !config.store.is_in_memory() {
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent).with_context(|| {
                        format!("failed to create database directory {}", parent.display())
                    })?;
                }
            }
            let db = KanbanDb::open_local(&path.to_string_lossy())
                .await
                .with_context(|| format!("failed to open task database {}", path.display()))?;
            tracing::debug!(path = %path.display(), "using local task store");
            Ok(Box::new(db))
        }
        StoreBackend::Remote => {
            let store = RestTaskStore::new(config.remote.rest_url(), &config.remote.anon_key, timeout)
                .context("failed to build remote task store client")?;
            tracing::debug!(url = %config.remote.url, "using remote task store");
            Ok(Box::new(store))
        }
    }
}
