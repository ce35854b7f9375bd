use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use srctrack::config::Config;
use srctrack::stats::StatsManager;

mod cli;

#[derive(Parser)]
#[command(name = "srctrack")]
#[command(about = "Source Code Tracker - declare and track the provenance of your code")]
#[command(version)]
struct Cli {
    /// Path to the config file (defaults to ~/.srctrack/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Path to the stats file (overrides the configured location)
    #[arg(short, long, global = true)]
    stats_file: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Declare a block of code as manually written, copied or AI-generated
    Declare {
        /// File whose character count is declared (reads stdin when omitted
        /// and --chars is not given)
        file: Option<PathBuf>,

        /// Source of the code: manual, copied or ai (prompts when omitted)
        #[arg(long)]
        source: Option<String>,

        /// Declare a raw character count instead of counting a file
        #[arg(long)]
        chars: Option<u64>,
    },

    /// Show the accumulated statistics
    Stats {
        /// Print JSON instead of human output
        #[arg(long)]
        json: bool,
    },

    /// Run the HTTP endpoint (receives declarations from IDE extensions)
    Serve {
        /// Port to listen on (overrides config)
        #[arg(long)]
        port: Option<u16>,

        /// Shared secret for IDE extension requests (overrides config)
        #[arg(long)]
        token: Option<String>,
    },

    /// Reset all counters to zero
    Reset {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Initialize a new ~/.srctrack/config.toml configuration file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    match cli.command {
        Commands::Declare {
            file,
            source,
            chars,
        } => {
            let (_, mut manager) = load_environment(&cli.config, cli.stats_file)?;
            cli::declare::declare_command(&mut manager, file, source, chars).await?;
        }
        Commands::Stats { json } => {
            let (_, manager) = load_environment(&cli.config, cli.stats_file)?;
            cli::stats::stats_command(&manager, json).await?;
        }
        Commands::Serve { port, token } => {
            let (config, manager) = load_environment(&cli.config, cli.stats_file)?;
            cli::serve::serve_command(manager, &config, port, token).await?;
        }
        Commands::Reset { yes } => {
            let (_, mut manager) = load_environment(&cli.config, cli.stats_file)?;
            cli::reset::reset_command(&mut manager, yes).await?;
        }
        Commands::Init { force } => {
            cli::init::init_command(cli.config, force).await?;
        }
    }

    Ok(())
}

/// Load the configuration and the stats manager it points at.
/// `Init` does not go through here, so it never triggers config auto-init.
fn load_environment(
    config_path: &Option<PathBuf>,
    stats_file: Option<PathBuf>,
) -> Result<(Config, StatsManager)> {
    let config = match config_path {
        Some(path) => Config::from_file(path)?,
        None => Config::load()?,
    };

    let stats_path = stats_file.unwrap_or_else(|| config.stats_path());
    let manager = StatsManager::with_path(&stats_path);

    Ok((config, manager))
}
