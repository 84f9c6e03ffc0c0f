//! Command-line interface for polyboard.

use crate::AppConfig;
use crate::config::DEFAULT_CONFIG_PATH;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Polyboard - play board games against a computer opponent
#[derive(Parser, Debug)]
#[command(name = "polyboard")]
#[command(about = "Play Ataxx, Connect 4, Othello, Tic-tac-toe and Kalah against the computer", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Front end to run (defaults to the terminal UI)
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the configuration file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Variant to start with, by name or index
    #[arg(long, global = true)]
    pub variant: Option<String>,

    /// Search depth bound in plies
    #[arg(long, global = true)]
    pub depth: Option<u32>,

    /// Search time bound in seconds
    #[arg(long, global = true)]
    pub time: Option<u32>,

    /// Do not answer human moves automatically
    #[arg(long, global = true)]
    pub no_auto_reply: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Command {
    /// Run the terminal UI
    #[default]
    Tui,

    /// Play line by line on stdin and stdout
    Console,

    /// List the available variants and exit
    Variants,
}

impl Cli {
    /// Applies command-line overrides on top of the file configuration.
    pub fn overlay(&self, config: AppConfig) -> AppConfig {
        let mut config = config;
        if let Some(variant) = &self.variant {
            config = config.with_default_variant(variant.clone());
        }
        if let Some(depth) = self.depth {
            config = config.with_search_depth(depth);
        }
        if let Some(time) = self.time {
            config = config.with_search_time_secs(time);
        }
        if self.no_auto_reply {
            config = config.with_auto_reply(false);
        }
        config
    }
}
