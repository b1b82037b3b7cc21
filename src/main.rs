//! tickerwatch CLI application.

mod cli;
mod service;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use std::path::Path;
use ticker_config::{load_config, LoggingConfig};
use ticker_monitor::setup_logging;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Commands report configuration errors themselves; logging falls back
    // to defaults here.
    let logging = load_config(&cli.config)
        .map(|config| config.logging)
        .unwrap_or_else(|_| LoggingConfig::default());
    let level = cli
        .log_level
        .map_or(logging.level.as_str(), |level| level.as_str());
    let json = cli.json_logs || logging.format == "json";
    let _guard = setup_logging(level, json, logging.file.as_deref().map(Path::new));

    match cli.command {
        Commands::Add(args) => cli::commands::add::run(args, &cli.config).await,
        Commands::Rm(args) => cli::commands::rm::run(args, &cli.config).await,
        Commands::Ls(args) => cli::commands::ls::run(args, &cli.config).await,
        Commands::Ind(args) => cli::commands::ind::run(args, &cli.config).await,
        Commands::Chart(args) => cli::commands::chart::run(args, &cli.config).await,
        Commands::Mem(args) => cli::commands::mem::run(args, &cli.config).await,
        Commands::Run(args) => cli::commands::run::run(args, &cli.config).await,
        Commands::Watch(args) => cli::commands::watch::run(args, &cli.config).await,
        Commands::Strategies => cli::commands::strategies::run().await,
        Commands::ValidateConfig => cli::commands::validate::run(&cli.config).await,
    }
}
