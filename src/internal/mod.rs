//! scopelog's own diagnostic logger. Config problems, failed logging calls, and the
//! one-shot "no destinations" notice go through the same hierarchy the crate provides,
//! in a private context of its own.
//!
//! Uses `OnceLock` so the context is built exactly once, even if several entry points
//! (CLI, library callers, tests) race to log first. The private context has no last
//! resort, never raises, and never warns about missing destinations, so reporting
//! cannot recurse.

use crate::context::Context;
use crate::destination::{Destination, StreamDestination};
use crate::fmt::TemplateFormatter;
use crate::level::Level;
use std::sync::{Arc, OnceLock};

static INTERNAL_CONTEXT: OnceLock<Context> = OnceLock::new();

/// Scope prefix of every internal logger.
const PREFIX: &str = "scopelog";

fn context() -> &'static Context {
    INTERNAL_CONTEXT.get_or_init(build_internal_context)
}

fn build_internal_context() -> Context {
    let ctx = Context::new();
    ctx.set_last_resort(None);
    ctx.set_warn_missing_destinations(false);
    ctx.set_raise_errors(false);

    let stderr = StreamDestination::stderr();
    stderr.set_formatter(Arc::new(TemplateFormatter::new("[{scope}] {level}: {msg}")));

    let root = ctx.root();
    root.add_destination(Arc::new(stderr));
    root.set_level(Level::WARNING);
    ctx
}

/// Raises or lowers the verbosity of internal diagnostics (`WARNING` by default).
pub fn set_level(level: Level) {
    context().root().set_level(level);
}

#[must_use]
pub fn level() -> Level {
    context().root().level()
}

fn log(level: Level, scope: &str, msg: &str) {
    context()
        .get_logger(&format!("{PREFIX}.{scope}"))
        .log(level, msg);
}

/// Startup, teardown, and tree-shape details.
pub fn debug(scope: &str, msg: &str) {
    log(Level::DEBUG, scope, msg);
}

/// Operational milestones such as a config file being loaded.
pub fn info(scope: &str, msg: &str) {
    log(Level::INFO, scope, msg);
}

/// Non-fatal anomalies: missing include files, records with nowhere to go.
pub fn warn(scope: &str, msg: &str) {
    log(Level::WARNING, scope, msg);
}

/// Failed logging calls and destination errors that were handed back.
pub fn error(scope: &str, msg: &str) {
    log(Level::ERROR, scope, msg);
}
