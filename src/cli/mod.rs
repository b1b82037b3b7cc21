//! CLI definitions.

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tickerwatch")]
#[command(author, version, about = "Daily-bar ticker watcher with indicator-driven buy/sell alerts")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Log level (defaults to logging.level from the configuration)
    #[arg(short, long)]
    pub log_level: Option<LogLevel>,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Track a symbol
    Add(AddArgs),
    /// Stop tracking a symbol
    Rm(SymbolArgs),
    /// Show the status table of tracked symbols
    Ls(LsArgs),
    /// Print the latest indicator values of a symbol
    Ind(SymbolArgs),
    /// Print the full chart series of a symbol as JSON
    Chart(SymbolArgs),
    /// Print how much series data the storage holds
    Mem(MemArgs),
    /// Backfill history and process the candle stream until Ctrl-C
    Run(RunArgs),
    /// Run like `run` behind a live status dashboard
    Watch(WatchArgs),
    /// List available signal policies
    Strategies,
    /// Validate configuration
    ValidateConfig,
}

#[derive(clap::Args)]
pub struct AddArgs {
    /// Symbol to track (case-insensitive)
    pub symbol: String,

    /// Reference buy price used for change reporting
    #[arg(short, long, default_value = "0")]
    pub buy_price: f64,

    /// Skip the history check against the data source
    #[arg(long)]
    pub offline: bool,
}

#[derive(clap::Args)]
pub struct SymbolArgs {
    /// Symbol (case-insensitive)
    pub symbol: String,
}

#[derive(clap::Args)]
pub struct LsArgs {
    /// Print rows as JSON
    #[arg(long)]
    pub json: bool,

    /// Skip the history backfill
    #[arg(long)]
    pub no_fetch: bool,
}

#[derive(clap::Args)]
pub struct MemArgs {
    /// Print the totals as JSON
    #[arg(long)]
    pub json: bool,

    /// Skip the history backfill
    #[arg(long)]
    pub no_fetch: bool,
}

#[derive(clap::Args)]
pub struct RunArgs {
    /// Newest bars replayed per symbol (overrides fetch.replay_bars)
    #[arg(long)]
    pub replay_bars: Option<usize>,

    /// Pause between replay rounds in milliseconds (overrides fetch.replay_interval_ms)
    #[arg(long)]
    pub interval_ms: Option<u64>,
}

#[derive(clap::Args)]
pub struct WatchArgs {
    #[command(flatten)]
    pub run: RunArgs,

    /// Dashboard refresh interval in milliseconds
    #[arg(long, default_value = "500")]
    pub refresh_ms: u64,
}
