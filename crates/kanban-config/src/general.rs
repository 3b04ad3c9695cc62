//! General application configuration.

use serde::{Deserialize, Serialize};

/// Default output format for CLI commands.
fn default_format() -> String {
    "json".to_string()
}

/// Default HTTP request timeout in seconds.
const fn default_request_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Output format used when `--format` is not given (`json`, `table`, `raw`).
    #[serde(default = "default_format")]
    pub default_format: String,

    /// Timeout applied to task store requests, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_format: default_format(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}
