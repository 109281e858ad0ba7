//! `scopelog` - hierarchical, scope-named logging.
//!
//! Loggers are addressed by dotted scopes (`app.net.http`) and form a tree under a
//! single root. A record is checked once against the logger's effective level,
//! then handed to every destination on the way up the tree until a logger with
//! `propagate` switched off is reached.
//!
//! - Registry of level numbers and names, with custom levels
//! - Placeholder-aware logger tree that tolerates any creation order
//! - Filters on loggers and destinations that may rewrite records
//! - Pluggable destinations, formatters, and logger/record factories
//! - One-call root setup and a TOML config file with includes
//!
//! # Example
//!
//! ```
//! use scopelog::{CaptureDestination, Context, Level};
//! use std::sync::Arc;
//!
//! let ctx = Context::new();
//! let capture = Arc::new(CaptureDestination::new());
//! ctx.root().add_destination(capture.clone());
//! ctx.root().set_level(Level::DEBUG);
//!
//! let net = ctx.get_logger("app.net");
//! net.info("connected");
//! net.debug("handshake done");
//!
//! assert_eq!(
//!     capture.lines(),
//!     vec!["INFO:app.net:connected", "DEBUG:app.net:handshake done"]
//! );
//! ```
//!
//! # Features
//!
//! - `cli` (default): the `scopelog` command-line tool

pub mod config;
pub mod context;
pub mod destination;
pub mod error;
pub mod filter;
pub mod fmt;
pub mod internal;
pub mod level;
pub mod logger;
pub mod manager;
pub mod record;

mod sync;

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;

// Re-exports for convenience
pub use config::Config;
pub use context::{Context, critical, debug, error, get_logger, global, info, root, warning};
pub use destination::{
    CaptureDestination, Destination, DestinationCore, DestinationTable, FileMode,
    StreamDestination,
};
pub use error::Error;
pub use filter::{Filter, FilterChain, FilterOutcome, PredicateFilter, ScopeFilter, filter_fn};
pub use fmt::{Format, TemplateFormatter};
pub use level::{Level, LevelLookup, LevelRegistry, LevelSpec};
pub use logger::{BasicConfig, Logger};
pub use manager::{DefaultLoggerFactory, LoggerFactory, Manager};
pub use record::{DefaultRecordFactory, LogOptions, Record, RecordFactory, RecordParts};
