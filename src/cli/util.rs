//! Utility functions for the CLI.

use crate::config::Config;
use crate::context::Context;
use crate::level::{Level, LevelSpec};
use crate::logger::BasicConfig;
use std::path::Path;

/// Builds a fresh context from the config at `path`, or the default location.
///
/// A root the config leaves without destinations gets the stderr default, so
/// `log` always has somewhere to write.
///
/// # Errors
/// Config loading or application errors.
pub fn load_context(path: Option<&Path>) -> Result<Context, crate::Error> {
    let config = match path {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let ctx = Context::new();
    config.apply(&ctx)?;
    if !ctx.root().has_destinations() {
        ctx.configure_root(BasicConfig::new())?;
    }
    Ok(ctx)
}

/// Resolves a level argument against the context's names. Digits are taken as a
/// level number.
///
/// # Errors
/// [`Error::UnknownLevel`](crate::Error::UnknownLevel) for unregistered names.
pub fn parse_level(ctx: &Context, arg: &str) -> Result<Level, crate::Error> {
    let spec = arg
        .parse::<u32>()
        .map_or_else(|_| LevelSpec::from(arg), LevelSpec::from);
    ctx.levels().validate(spec)
}
