//! `scopelog levels`: the registered names, lowest level first.

use crate::context::Context;
use std::process::ExitCode;

#[must_use]
pub fn cmd_levels(ctx: &Context) -> ExitCode {
    let mut names: Vec<_> = ctx.levels().names_mapping().into_iter().collect();
    names.sort_by(|(a_name, a), (b_name, b)| a.cmp(b).then_with(|| a_name.cmp(b_name)));

    for (name, level) in names {
        println!("{:>5}  {name}", level.value());
    }
    ExitCode::SUCCESS
}
