//! Each subcommand lives in its own file, so the dispatch in main stays a thin match.

mod levels;
mod log;
mod tree;

pub use levels::cmd_levels;
pub use log::cmd_log;
pub use tree::cmd_tree;
