//! Unified error type for all scopelog operations.

use std::path::PathBuf;

/// Error type for scopelog operations.
///
/// Configuration-time variants reach the caller directly; emission failures only
/// surface through [`Logger::try_log`](crate::Logger::try_log) when the owning
/// context has `raise_errors` switched on.
#[derive(Debug)]
pub enum Error {
    /// A level name that was never registered.
    UnknownLevel(String),
    /// A level given as something other than a number or a name.
    InvalidLevelType(String),
    /// An `extra` key shadows a built-in record attribute.
    AttributeCollision(String),
    /// A custom logger factory produced something that isn't a usable logger node.
    TypeConstraint(String),
    /// Mutually exclusive configuration options were combined.
    ConflictingConfig(String),
    /// A configuration value that has no meaning (unknown stream, file mode, ...).
    InvalidConfig(String),
    /// A destination hook the concrete sink was expected to provide.
    NotImplemented(&'static str),
    /// A destination failed to render or write a record.
    Emit(String),
    /// I/O error.
    Io(std::io::Error),
    /// TOML config parsing error.
    ConfigParse(toml::de::Error),
    /// Config directory not found.
    ConfigDirNotFound,
    /// Cyclic include detected in config sources.
    CyclicInclude(PathBuf),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownLevel(name) => write!(f, "unknown level: '{name}'"),
            Self::InvalidLevelType(kind) => {
                write!(f, "level must be a number or a name, got {kind}")
            }
            Self::AttributeCollision(key) => {
                write!(f, "attempt to overwrite '{key}' in record")
            }
            Self::TypeConstraint(msg) => write!(f, "logger factory rejected: {msg}"),
            Self::ConflictingConfig(msg) => write!(f, "conflicting configuration: {msg}"),
            Self::InvalidConfig(msg) => write!(f, "invalid configuration: {msg}"),
            Self::NotImplemented(hook) => {
                write!(f, "{hook} must be implemented by the destination")
            }
            Self::Emit(msg) => write!(f, "emit failed: {msg}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::ConfigParse(e) => write!(f, "parse error: {e}"),
            Self::ConfigDirNotFound => write!(f, "config directory not found"),
            Self::CyclicInclude(p) => write!(f, "cyclic include: {}", p.display()),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::ConfigParse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Self::ConfigParse(e)
    }
}
