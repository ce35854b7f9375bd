//! Settings configuration types

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// General settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Override for the stats file location (defaults to ~/.srctrack/stats.json)
    #[serde(default)]
    pub stats_path: Option<PathBuf>,

    /// Local HTTP endpoint settings (IDE extension communication)
    #[serde(default)]
    pub http: HttpSettings,
}

/// Local HTTP endpoint settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpSettings {
    /// Port the declare/stats endpoints listen on
    #[serde(default = "default_http_port")]
    pub port: u16,

    /// Shared secret for IDE extension requests (sent as `X-SRCTRACK-Token`).
    /// Leave empty to disable auth.
    #[serde(default)]
    pub token: String,
}

fn default_http_port() -> u16 {
    8735
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            port: default_http_port(),
            token: String::new(),
        }
    }
}
