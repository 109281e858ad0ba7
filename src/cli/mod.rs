//! CLI module for scopelog.
//!
//! This module provides the command-line interface using Clap.

pub mod commands;
pub mod util;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// scopelog - Emit and inspect hierarchical log records from the command line.
#[derive(Parser)]
#[command(
    name = "scopelog",
    version,
    about = "Emit and inspect hierarchical log records"
)]
pub struct Cli {
    /// Config file to use instead of the default location
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
    /// Show scopelog's own debug diagnostics
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Log a message through the logger for a scope.
    Log {
        /// Dotted scope, empty for the root
        scope: String,
        /// Level name or number
        level: String,
        /// Log message
        #[arg(required = true)]
        message: Vec<String>,
    },
    /// Print the level number to name mapping.
    Levels,
    /// Print every configured logger with its levels and destinations.
    Tree,
}

pub use commands::{cmd_levels, cmd_log, cmd_tree};
pub use util::{load_context, parse_level};
