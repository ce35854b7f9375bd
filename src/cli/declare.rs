//! Declare command implementation

use std::io::{Read, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use srctrack::stats::{format_chars, SourceKind, StatsManager};

/// Declare a block of code and add its character count to the stats.
///
/// The count comes from `--chars`, else from `file` contents, else from
/// stdin. When no `--source` is given an interactive prompt asks for the
/// classification; cancelling records nothing.
pub async fn declare_command(
    manager: &mut StatsManager,
    file: Option<PathBuf>,
    source: Option<String>,
    chars: Option<u64>,
) -> Result<()> {
    let (char_count, from_stdin) = match (chars, &file) {
        (Some(n), _) => (n, false),
        (None, Some(path)) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            (content.chars().count() as u64, false)
        }
        (None, None) => {
            let mut content = String::new();
            std::io::stdin()
                .read_to_string(&mut content)
                .context("Failed to read code block from stdin")?;
            (content.chars().count() as u64, true)
        }
    };

    let kind = match source {
        Some(raw) => match raw.parse::<SourceKind>() {
            Ok(kind) => kind,
            Err(details) => bail!(details),
        },
        None => {
            if from_stdin {
                bail!("--source is required when the code block is piped via stdin");
            }
            match prompt_for_kind(char_count)? {
                Some(kind) => kind,
                None => {
                    println!("Cancelled, nothing recorded.");
                    return Ok(());
                }
            }
        }
    };

    manager.record(kind, char_count);
    println!(
        "Added {} characters as {}",
        format_chars(char_count),
        kind.label()
    );

    Ok(())
}

/// Interactive classification prompt. Returns `None` when the user cancels.
fn prompt_for_kind(char_count: u64) -> Result<Option<SourceKind>> {
    println!("Selected code: {} characters", format_chars(char_count));
    println!();
    println!("What is the source of this code?");
    println!("  [m] Manually Written");
    println!("  [c] Copied");
    println!("  [a] AI-Generated");
    println!("  [enter] Cancel");
    print!("> ");
    std::io::stdout().flush().context("Failed to flush stdout")?;

    let mut line = String::new();
    std::io::stdin()
        .read_line(&mut line)
        .context("Failed to read classification choice")?;

    let choice = line.trim();
    if choice.is_empty()
        || choice.eq_ignore_ascii_case("cancel")
        || choice.eq_ignore_ascii_case("q")
    {
        return Ok(None);
    }

    match choice.parse::<SourceKind>() {
        Ok(kind) => Ok(Some(kind)),
        Err(details) => bail!(details),
    }
}
