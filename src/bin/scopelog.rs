//! `scopelog` binary: applies the config file to a fresh context, then runs one
//! subcommand against it.
//!
//! Usage:
//!   scopelog log <scope> <level> <msg..>   Log a message
//!   scopelog levels                        List level names
//!   scopelog tree                          Show configured loggers

use clap::Parser;
use scopelog::Level;
use scopelog::cli::{Cli, Command, cmd_levels, cmd_log, cmd_tree, load_context};
use scopelog::internal;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.verbose {
        internal::set_level(Level::DEBUG);
    }

    // Config decides where records go, so it is applied before any command runs
    let ctx = match load_context(cli.config.as_deref()) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error loading config: {e}");
            return ExitCode::FAILURE;
        }
    };

    let code = match &cli.command {
        Command::Log {
            scope,
            level,
            message,
        } => cmd_log(&ctx, scope, level, message),
        Command::Levels => cmd_levels(&ctx),
        Command::Tree => cmd_tree(&ctx),
    };

    ctx.shutdown();
    code
}
