//! Init command implementation

use anyhow::{bail, Result};
use std::path::PathBuf;

use srctrack::config::Config;

/// Default configuration content for srctrack init
pub const DEFAULT_CONFIG: &str = r#"# srctrack Configuration
# ======================
#
# Declarations are recorded via the CLI (`srctrack declare`) or sent by IDE
# extensions to the local HTTP endpoint (`srctrack serve`).

[settings]
# Override the stats file location (defaults to ~/.srctrack/stats.json)
# stats_path = "/path/to/stats.json"

# Local HTTP endpoint for IDE extensions
[settings.http]
port = 8735
# Optional: shared secret for IDE extension requests (sent as `X-SRCTRACK-Token`)
# Leave empty to disable auth (recommended for local development)
token = ""
"#;

/// Initialize a new srctrack configuration file
/// By default creates the global config at ~/.srctrack/config.toml
pub async fn init_command(config_path: Option<PathBuf>, force: bool) -> Result<()> {
    let config_path = config_path.unwrap_or_else(Config::global_config_path);

    if config_path.exists() && !force {
        bail!(
            "Configuration already exists: {}\nUse --force to overwrite.",
            config_path.display()
        );
    }

    if let Some(parent) = config_path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)?;
    println!("Created: {}", config_path.display());

    Ok(())
}
