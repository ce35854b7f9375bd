//! Serve command implementation

use anyhow::Result;

use srctrack::config::Config;
use srctrack::server;
use srctrack::stats::StatsManager;

/// Run the local HTTP endpoint for IDE extensions
pub async fn serve_command(
    manager: StatsManager,
    config: &Config,
    port: Option<u16>,
    token: Option<String>,
) -> Result<()> {
    let port = port.unwrap_or(config.settings.http.port);
    let token = token.or_else(|| {
        let configured = config.settings.http.token.trim();
        (!configured.is_empty()).then(|| configured.to_string())
    });

    println!("srctrack listening on http://127.0.0.1:{}", port);
    println!("Stats file: {}", manager.file_path().display());

    server::run_server(manager, port, token)
}
