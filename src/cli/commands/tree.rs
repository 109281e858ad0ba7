//! `scopelog tree`: one line per logger, root first.

use crate::context::Context;
use crate::logger::Logger;
use std::process::ExitCode;

fn describe(ctx: &Context, logger: &Logger) -> String {
    let scope = if logger.is_root() {
        "<root>"
    } else {
        logger.scope()
    };
    format!(
        "{scope}  level={} effective={} propagate={} destinations={}",
        ctx.level_name(logger.level()),
        ctx.level_name(logger.effective_level()),
        logger.propagate(),
        logger.destinations().len(),
    )
}

#[must_use]
pub fn cmd_tree(ctx: &Context) -> ExitCode {
    println!("{}", describe(ctx, &ctx.root()));
    for logger in ctx.manager().loggers() {
        println!("{}", describe(ctx, &logger));
    }
    ExitCode::SUCCESS
}
