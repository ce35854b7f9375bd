//! Stats command implementation

use anyhow::Result;

use srctrack::stats::StatsManager;

/// Print the accumulated statistics
pub async fn stats_command(manager: &StatsManager, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&manager.stats().report())?);
    } else {
        print!("{}", manager.summary());
    }

    Ok(())
}
