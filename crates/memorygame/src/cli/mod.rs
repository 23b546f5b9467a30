//! Command-line interface for memorygame.
//!
//! This module provides the CLI structure for the `memgame` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{ConfigCommand, CreateCommand, DifficultyArg, DownloadCommand, PlayCommand};

/// memgame - Find the pairs
///
/// A card-pairs memory game for the terminal. Play on the built-in icons or
/// download a custom board by name.
#[derive(Debug, Parser)]
#[command(name = "memgame")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for info, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Play a game in the terminal
    Play(PlayCommand),

    /// Look up a custom board without playing it
    Download(DownloadCommand),

    /// Create a custom board from image URLs
    Create(CreateCommand),

    /// List the difficulty levels
    Sizes,

    /// View or check configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}
