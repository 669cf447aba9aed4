//! Parley CLI: the main entry point.
//!
//! Commands:
//! - `chat`: Interactive chat or single-message mode
//! - `config`: Show, initialise or validate the configuration
//! - `doctor`: Diagnose configuration and backend reachability

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;
mod input;

#[derive(Parser)]
#[command(
    name = "parley",
    about = "Parley: local intent routing with context-grounded streaming chat",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Read configuration from this file instead of ~/.parley/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Backend kind: `generate` (flat prompt) or `chat` (message list)
    #[arg(long, global = true)]
    backend: Option<String>,

    /// Backend base URL (e.g. http://localhost:11434)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Model name
    #[arg(long, global = true)]
    model: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Chat with the assistant
    Chat {
        /// Send a single message instead of entering interactive mode
        #[arg(short, long)]
        message: Option<String>,
    },

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Diagnose configuration and backend health
    Doctor,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,
    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Validate the configuration
    Validate,
    /// Print the configuration file path
    Path,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries the conversation.
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let overrides = commands::Overrides {
        config: cli.config,
        backend: cli.backend,
        base_url: cli.base_url,
        model: cli.model,
    };

    match cli.command {
        Commands::Chat { message } => commands::chat::run(&overrides, message).await?,
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config_cmd::show(&overrides).await?,
            ConfigAction::Init { force } => commands::config_cmd::init(&overrides, force).await?,
            ConfigAction::Validate => commands::config_cmd::validate(&overrides).await?,
            ConfigAction::Path => commands::config_cmd::path(&overrides).await?,
        },
        Commands::Doctor => commands::doctor::run(&overrides).await?,
    }

    Ok(())
}
