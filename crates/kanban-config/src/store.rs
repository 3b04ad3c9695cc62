//! Task store selection.

use serde::{Deserialize, Serialize};

/// Which task store backs the board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    /// Embedded libSQL database on disk.
    #[default]
    Local,
    /// PostgREST endpoint configured in `[remote]`.
    Remote,
}

fn default_path() -> String {
    ".kanban/board.db".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,

    /// Database file for the local backend, relative to the project root.
    /// `:memory:` keeps everything in RAM.
    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            path: default_path(),
        }
    }
}

impl StoreConfig {
    #[must_use]
    pub fn is_in_memory(&self) -> bool {
        self.path == ":memory:"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_local_file() {
        let config = StoreConfig::default();
        assert_eq!(config.backend, StoreBackend::Local);
        assert_eq!(config.path, ".kanban/board.db");
        assert!(!config.is_in_memory());
    }
}
