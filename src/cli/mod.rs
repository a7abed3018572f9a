//! CLI module for trainboard
//!
//! Command-line interface definitions and handlers for the arrivals board.
//!
//! # Commands
//!
//! - `watch` - Poll continuously and print the board on every update
//! - `once` - Run a single poll cycle and print the result
//! - `config` - Configuration utilities (init)
//! - `completions` - Generate shell completions
//!
//! # Example
//!
//! ```bash
//! # Watch Hoboken with default config
//! trainboard watch --station HOB
//!
//! # One-shot board as JSON
//! trainboard once --json
//!
//! # Generate shell completions
//! trainboard completions bash > ~/.bash_completion.d/trainboard
//! ```

pub mod completions;
pub mod config;
pub mod output;
pub mod watch;

pub use completions::handle_completions;
pub use config::handle_config_init;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// trainboard - live transit arrivals with freshness tracking
#[derive(Parser, Debug)]
#[command(
    name = "trainboard",
    version,
    about = "Live PATH arrivals board with adaptive polling and staleness detection"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Poll the feed continuously and print the board
    Watch(WatchArgs),
    /// Poll once and print the board
    Once(OnceArgs),
    /// Configuration utilities
    #[command(subcommand)]
    Config(ConfigCommands),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Options shared by every command that polls the feed.
#[derive(Args, Debug, Clone)]
pub struct BoardArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "trainboard.toml")]
    pub config: PathBuf,

    /// Override station code (e.g. HOB, WTC, JSQ)
    #[arg(short, long, env = "TRAINBOARD_STATION")]
    pub station: Option<String>,

    /// Override feed URL
    #[arg(long, env = "TRAINBOARD_FEED_URL")]
    pub feed_url: Option<String>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "TRAINBOARD_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct WatchArgs {
    #[command(flatten)]
    pub board: BoardArgs,

    /// Serve Prometheus metrics on this address (e.g. 127.0.0.1:9464)
    #[arg(long, env = "TRAINBOARD_METRICS_LISTEN")]
    pub metrics_listen: Option<String>,
}

#[derive(Args, Debug)]
pub struct OnceArgs {
    #[command(flatten)]
    pub board: BoardArgs,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Initialize a new configuration file
    Init(ConfigInitArgs),
}

#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Output file path
    #[arg(short, long, default_value = "trainboard.toml")]
    pub output: PathBuf,

    /// Overwrite existing file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
