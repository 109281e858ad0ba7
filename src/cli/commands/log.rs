//! `scopelog log <scope> <level> <msg..>`.

use crate::cli::util::parse_level;
use crate::context::Context;
use crate::internal;
use crate::record::LogOptions;
use std::process::ExitCode;

#[must_use]
pub fn cmd_log(ctx: &Context, scope: &str, level: &str, message: &[String]) -> ExitCode {
    let level = match parse_level(ctx, level) {
        Ok(level) => level,
        Err(e) => {
            internal::error("cli", &e.to_string());
            return ExitCode::FAILURE;
        }
    };

    let logger = ctx.get_logger(scope);
    match logger.try_log(level, message.join(" "), LogOptions::new()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            internal::error("cli", &format!("Logging failed: {e}"));
            ExitCode::FAILURE
        }
    }
}
