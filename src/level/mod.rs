//! Severity levels that gate which records reach which destinations.
//!
//! Levels are plain numbers so applications can slot their own severities between the
//! reserved ones; the names live in a runtime [`LevelRegistry`].

mod registry;

pub use registry::{LevelLookup, LevelRegistry};

use std::fmt;
use std::str::FromStr;

/// Numeric severity. Higher is more severe; `NOTSET` on a logger means "inherit".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Level(u32);

impl Level {
    /// Inherit from the nearest ancestor with an explicit level.
    pub const NOTSET: Self = Self(0);
    pub const DEBUG: Self = Self(10);
    pub const INFO: Self = Self(20);
    pub const WARNING: Self = Self(30);
    pub const WARN: Self = Self::WARNING;
    pub const ERROR: Self = Self(40);
    pub const CRITICAL: Self = Self(50);
    pub const FATAL: Self = Self::CRITICAL;

    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }

    #[must_use]
    pub const fn is_notset(self) -> bool {
        self.0 == 0
    }

    /// Name of a reserved level, independent of any registry mutations.
    #[must_use]
    pub const fn canonical_name(self) -> Option<&'static str> {
        match self.0 {
            0 => Some("NOTSET"),
            10 => Some("DEBUG"),
            20 => Some("INFO"),
            30 => Some("WARNING"),
            40 => Some("ERROR"),
            50 => Some("CRITICAL"),
            _ => None,
        }
    }

    /// The reserved levels, lowest first.
    #[must_use]
    pub const fn all() -> [Self; 6] {
        [
            Self::NOTSET,
            Self::DEBUG,
            Self::INFO,
            Self::WARNING,
            Self::ERROR,
            Self::CRITICAL,
        ]
    }
}

impl From<u32> for Level {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<Level> for u32 {
    fn from(level: Level) -> Self {
        level.0
    }
}

/// Registry-independent rendering; use [`LevelRegistry::name_of`] for runtime names.
impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.canonical_name() {
            Some(name) => f.write_str(name),
            None => write!(f, "Level {}", self.0),
        }
    }
}

/// Returned by `FromStr` so callers can distinguish "unknown level" from other parse failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLevelError(String);

impl fmt::Display for ParseLevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown log level: '{}'", self.0)
    }
}

impl std::error::Error for ParseLevelError {}

/// Parses reserved names, their synonyms, and bare numbers. Custom names need a registry.
impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "NOTSET" => Ok(Self::NOTSET),
            "DEBUG" => Ok(Self::DEBUG),
            "INFO" => Ok(Self::INFO),
            "WARNING" | "WARN" => Ok(Self::WARNING),
            "ERROR" => Ok(Self::ERROR),
            "CRITICAL" | "FATAL" => Ok(Self::CRITICAL),
            other => other
                .parse::<u32>()
                .map(Self)
                .map_err(|_| ParseLevelError(s.to_string())),
        }
    }
}

/// A level as supplied by a caller or a config file, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelSpec {
    Number(u32),
    Name(String),
}

impl From<Level> for LevelSpec {
    fn from(level: Level) -> Self {
        Self::Number(level.value())
    }
}

impl From<u32> for LevelSpec {
    fn from(value: u32) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for LevelSpec {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for LevelSpec {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl TryFrom<&toml::Value> for LevelSpec {
    type Error = crate::Error;

    fn try_from(value: &toml::Value) -> Result<Self, Self::Error> {
        match value {
            toml::Value::String(name) => Ok(Self::Name(name.clone())),
            toml::Value::Integer(n) => u32::try_from(*n)
                .map(Self::Number)
                .map_err(|_| crate::Error::InvalidLevelType(format!("integer {n}"))),
            other => Err(crate::Error::InvalidLevelType(other.type_str().to_string())),
        }
    }
}
