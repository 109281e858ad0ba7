//! Configuration struct definitions.

use serde::Deserialize;

/// `[root]` section. Every key is optional; an empty section leaves the root alone.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RootConfig {
    /// Level as a name or a number.
    pub level: Option<toml::Value>,
    /// Template for the root's destinations.
    pub format: Option<String>,
    /// `strftime` format for `{timestamp}`.
    pub timestamp_format: Option<String>,
    /// Log file path (`~` expanded).
    pub file: Option<String>,
    /// File mode: "a"/"append" or "w"/"truncate".
    pub mode: Option<String>,
    /// "stderr" or "stdout".
    pub stream: Option<String>,
    /// Replace destinations the root already has.
    pub force: bool,
}

impl RootConfig {
    /// True when the section sets nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.level.is_none()
            && self.format.is_none()
            && self.timestamp_format.is_none()
            && self.file.is_none()
            && self.mode.is_none()
            && self.stream.is_none()
            && !self.force
    }
}

/// `[loggers."<scope>"]` section.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct LoggerConfig {
    /// Level as a name or a number.
    pub level: Option<toml::Value>,
    pub propagate: Option<bool>,
    pub disabled: Option<bool>,
    /// Dedicated log file for this scope.
    pub file: Option<String>,
    pub mode: Option<String>,
    /// "stderr" or "stdout".
    pub stream: Option<String>,
    /// Template for the destination built from `file` or `stream`.
    pub format: Option<String>,
}
