//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::board::BoardSize;

/// Play command arguments.
#[derive(Debug, Args)]
pub struct PlayCommand {
    /// Difficulty level (defaults to the configured one)
    #[arg(short, long, value_enum)]
    pub difficulty: Option<DifficultyArg>,

    /// Start on this custom board
    #[arg(short, long, value_name = "NAME")]
    pub game: Option<String>,

    /// Shuffle seed for a reproducible deal
    #[arg(long)]
    pub seed: Option<u64>,

    /// Disable colour output
    #[arg(long)]
    pub no_color: bool,
}

/// Download command arguments.
#[derive(Debug, Args)]
pub struct DownloadCommand {
    /// Name of the custom board
    pub name: String,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Create command arguments.
#[derive(Debug, Args)]
pub struct CreateCommand {
    /// Name for the new board (3-14 letters or digits)
    pub name: String,

    /// Difficulty level; decides how many images are needed
    #[arg(short, long, value_enum)]
    pub difficulty: DifficultyArg,

    /// Image URL, one per pair (repeat the flag)
    #[arg(short, long = "image", value_name = "URL", required = true)]
    pub images: Vec<String>,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Difficulty argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DifficultyArg {
    /// 4 x 2 board, 4 pairs
    Easy,
    /// 6 x 3 board, 9 pairs
    Medium,
    /// 6 x 4 board, 12 pairs
    Hard,
}

impl From<DifficultyArg> for BoardSize {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Easy => Self::Easy,
            DifficultyArg::Medium => Self::Medium,
            DifficultyArg::Hard => Self::Hard,
        }
    }
}
