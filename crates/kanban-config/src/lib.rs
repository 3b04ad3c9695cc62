//! # kanban-config
//!
//! Layered configuration loading for the kanban board using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`KANBAN_*` prefix, `__` as separator)
//! 2. Project-level `.kanban/config.toml`
//! 3. User-level `~/.config/kanban/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `KANBAN_REMOTE__URL` -> `remote.url`, `KANBAN_CHAT__API_KEY` -> `chat.api_key`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use kanban_config::KanbanConfig;
//!
//! let config = KanbanConfig::load_with_dotenv().expect("config");
//! if config.chat.is_configured() {
//!     println!("Chat endpoint: {}", config.chat.url);
//! }
//! ```

mod chat;
mod error;
mod general;
mod remote;
mod store;

pub use chat::ChatConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use remote::RemoteConfig;
pub use store::{StoreBackend, StoreConfig};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the per-project directory holding config and the local database.
pub const PROJECT_DIR: &str = ".kanban";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct KanbanConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub remote: RemoteConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl KanbanConfig {
    /// Load configuration for the current directory from all sources.
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need `.env` file loading.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_for(Path::new("."))
    }

    /// Load configuration with the project-level file resolved under `project_root`.
    pub fn load_for(project_root: &Path) -> Result<Self, ConfigError> {
        let config: Self = Self::figment_for(project_root).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// Loads `.env` from the current directory (if present) before building the figment.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain for the current directory.
    pub fn figment() -> Figment {
        Self::figment_for(Path::new("."))
    }

    /// Build the figment provider chain with the project layer rooted at `project_root`.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    pub fn figment_for(project_root: &Path) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = project_root.join(PROJECT_DIR).join("config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("KANBAN_").split("__"))
    }

    /// Check cross-section requirements that serde defaults cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store.backend == StoreBackend::Remote && !self.remote.is_configured() {
            return Err(ConfigError::NotConfigured {
                section: "remote".into(),
            });
        }
        if self.general.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "general.request_timeout_secs".into(),
                reason: "must be greater than zero".into(),
            });
        }
        Ok(())
    }

    /// Local database path resolved against the project root.
    #[must_use]
    pub fn database_path(&self, project_root: &Path) -> PathBuf {
        let path = PathBuf::from(&self.store.path);
        if self.store.is_in_memory() || path.is_absolute() {
            path
        } else {
            project_root.join(path)
        }
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("kanban").join("config.toml"))
    }
}
