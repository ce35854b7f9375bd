//! Reset command implementation

use std::io::Write;

use anyhow::{Context, Result};

use srctrack::stats::StatsManager;

/// Zero all counters after confirmation
pub async fn reset_command(manager: &mut StatsManager, yes: bool) -> Result<()> {
    if !yes {
        print!("This permanently clears all recorded statistics. Continue? [y/N] ");
        std::io::stdout().flush().context("Failed to flush stdout")?;

        let mut line = String::new();
        std::io::stdin()
            .read_line(&mut line)
            .context("Failed to read confirmation")?;

        if !matches!(line.trim().to_lowercase().as_str(), "y" | "yes") {
            println!("Aborted.");
            return Ok(());
        }
    }

    manager.reset();
    println!("Statistics reset ({})", manager.file_path().display());

    Ok(())
}
