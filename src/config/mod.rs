//! TOML configuration loading, `source = "..."` include resolution, and applying the
//! result to a [`Context`].
//!
//! Separated from struct definitions so that the loading logic (file I/O, cycle detection,
//! merge strategy) stays independent of the serde schema.

mod structs;

pub use structs::{LoggerConfig, RootConfig};

use crate::context::Context;
use crate::destination::{Destination, FileMode, StreamDestination};
use crate::fmt::TemplateFormatter;
use crate::internal;
use crate::level::Level;
use crate::logger::BasicConfig;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// An empty file is a valid config that changes nothing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Tree-wide disable threshold, as a name or a number.
    pub disable: Option<toml::Value>,
    /// Hand destination failures back from `try_log`.
    pub raise_errors: Option<bool>,
    /// Custom level names, registered before anything else is applied.
    pub levels: HashMap<String, u32>,
    pub root: RootConfig,
    /// Per-scope settings keyed by dotted scope.
    pub loggers: HashMap<String, LoggerConfig>,
}

/// Scans raw TOML for `source = "..."` directives before deserialization,
/// since serde cannot handle them.
/// Returns the extracted paths and the remaining TOML content stripped of those lines.
#[doc(hidden)]
#[must_use]
pub fn extract_sources(content: &str) -> (Vec<String>, String) {
    let mut sources = Vec::new();
    let mut remaining = String::new();

    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with("source") && trimmed.contains('=') {
            if let Some(path) = trimmed
                .split('=')
                .nth(1)
                .map(|s| s.trim().trim_matches('"').trim_matches('\''))
                && !path.is_empty()
            {
                sources.push(path.to_string());
            }
        } else {
            remaining.push_str(line);
            remaining.push('\n');
        }
    }

    (sources, remaining)
}

impl Config {
    /// Loads the user's config from the default location with includes resolved.
    ///
    /// # Errors
    /// Fails if the config directory can't be determined or TOML parsing hits a syntax error.
    pub fn load() -> Result<Self, crate::Error> {
        internal::debug("config", "Loading config from default location");
        let config_path = Self::get_config_path()?;
        let config = Self::load_with_sources(&config_path, &mut HashSet::new())?;
        internal::info(
            "config",
            &format!("Config loaded from {}", config_path.display()),
        );
        Ok(config)
    }

    /// Loads configuration from an explicit path instead of the default location.
    ///
    /// # Errors
    /// Returns error if the file cannot be read, parsed, or contains cyclic includes.
    pub fn load_from(path: &Path) -> Result<Self, crate::Error> {
        Self::load_with_sources(path, &mut HashSet::new())
    }

    /// Parses a config held in memory. `source` lines are ignored.
    ///
    /// # Errors
    /// TOML syntax or schema errors.
    pub fn parse(content: &str) -> Result<Self, crate::Error> {
        let (_, toml_content) = extract_sources(content);
        Ok(toml::from_str(&toml_content)?)
    }

    /// Recursive loader that expands `source = "..."` includes while tracking
    /// visited paths in `seen` to break include cycles.
    fn load_with_sources(path: &Path, seen: &mut HashSet<PathBuf>) -> Result<Self, crate::Error> {
        if !path.exists() {
            internal::debug("config", "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let canonical = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

        if !seen.insert(canonical.clone()) {
            internal::warn(
                "config",
                &format!("Cyclic include detected: {}", canonical.display()),
            );
            return Err(crate::Error::CyclicInclude(canonical));
        }

        let content = fs::read_to_string(path)?;
        let (sources, toml_content) = extract_sources(&content);
        let mut config: Self = toml::from_str(&toml_content)?;

        for source_path in sources {
            internal::debug("config", &format!("Processing source: {source_path}"));
            let expanded = shellexpand::tilde(&source_path);
            let source_file = Path::new(expanded.as_ref());
            if source_file.exists() {
                let source_config = Self::load_with_sources(source_file, seen)?;
                config.merge(source_config);
            } else {
                internal::warn("config", &format!("Source file not found: {source_path}"));
            }
        }

        Ok(config)
    }

    /// Folds a sourced config into `self` without overwriting anything already set,
    /// so the including file takes precedence.
    pub fn merge(&mut self, other: Self) {
        if self.disable.is_none() {
            self.disable = other.disable;
        }
        if self.raise_errors.is_none() {
            self.raise_errors = other.raise_errors;
        }
        if self.root.is_empty() {
            self.root = other.root;
        }
        for (k, v) in other.levels {
            self.levels.entry(k).or_insert(v);
        }
        for (k, v) in other.loggers {
            self.loggers.entry(k).or_insert(v);
        }
    }

    /// `<config_dir>/scopelog/scopelog.toml`.
    ///
    /// # Errors
    /// Fails when the platform has no concept of a config directory.
    pub fn get_config_path() -> Result<PathBuf, crate::Error> {
        directories::BaseDirs::new()
            .map(|dirs| dirs.config_dir().join("scopelog").join("scopelog.toml"))
            .ok_or(crate::Error::ConfigDirNotFound)
    }

    /// Pushes the settings into `ctx`: level names, error policy, root, per-scope
    /// loggers in scope order, and finally the disable threshold.
    ///
    /// # Errors
    /// Unknown level names, non-level TOML values, conflicting targets, unknown
    /// streams or modes, and I/O errors opening log files.
    pub fn apply(&self, ctx: &Context) -> Result<(), crate::Error> {
        let mut levels: Vec<_> = self.levels.iter().collect();
        levels.sort_by_key(|(_, value)| **value);
        for (name, value) in levels {
            ctx.register_level(Level::new(*value), name.as_str());
        }

        if let Some(raise) = self.raise_errors {
            ctx.set_raise_errors(raise);
        }

        if !self.root.is_empty() {
            ctx.configure_root(self.root_config(ctx)?)?;
        }

        let mut scopes: Vec<_> = self.loggers.keys().collect();
        scopes.sort();
        for scope in scopes {
            Self::apply_logger(ctx, scope, &self.loggers[scope])?;
        }

        if let Some(value) = &self.disable {
            ctx.disable(ctx.levels().validate_value(value)?);
        }

        internal::debug("config", "Config applied");
        Ok(())
    }

    fn root_config(&self, ctx: &Context) -> Result<BasicConfig, crate::Error> {
        let root = &self.root;
        let mut basic = BasicConfig::new().force(root.force);

        if let Some(value) = &root.level {
            basic = basic.level(ctx.levels().validate_value(value)?);
        }
        if let Some(format) = &root.format {
            basic = basic.format(format);
        }
        if let Some(format) = &root.timestamp_format {
            basic = basic.timestamp_format(format);
        }
        if let Some(file) = &root.file {
            basic = basic.filename(file);
        }
        if let Some(mode) = &root.mode {
            basic = basic.mode(mode.parse()?);
        }
        match root.stream.as_deref() {
            None => {}
            Some("stderr") => basic = basic.stream(std::io::stderr()),
            Some("stdout") => basic = basic.stream(std::io::stdout()),
            Some(other) => {
                return Err(crate::Error::InvalidConfig(format!(
                    "unknown stream '{other}'"
                )));
            }
        }
        Ok(basic)
    }

    fn apply_logger(
        ctx: &Context,
        scope: &str,
        settings: &LoggerConfig,
    ) -> Result<(), crate::Error> {
        let logger = ctx.get_logger(scope);

        if let Some(value) = &settings.level {
            logger.set_level(ctx.levels().validate_value(value)?);
        }
        if let Some(propagate) = settings.propagate {
            logger.set_propagate(propagate);
        }
        if let Some(disabled) = settings.disabled {
            logger.set_disabled(disabled);
        }
        if let Some(destination) = logger_destination(settings)? {
            logger.add_destination(destination);
        }
        internal::debug("config", &format!("Configured logger '{scope}'"));
        Ok(())
    }
}

/// The file or stream destination a `[loggers]` entry asks for, if any.
fn logger_destination(
    settings: &LoggerConfig,
) -> Result<Option<Arc<dyn Destination>>, crate::Error> {
    let destination = match (&settings.file, settings.stream.as_deref()) {
        (Some(_), Some(_)) => {
            return Err(crate::Error::ConflictingConfig(
                "'stream' and 'file' should not be specified together".to_string(),
            ));
        }
        (Some(file), None) => {
            let mode = match &settings.mode {
                Some(mode) => mode.parse()?,
                None => FileMode::default(),
            };
            StreamDestination::file(file, mode)?
        }
        (None, Some("stderr")) => StreamDestination::stderr(),
        (None, Some("stdout")) => StreamDestination::stdout(),
        (None, Some(other)) => {
            return Err(crate::Error::InvalidConfig(format!(
                "unknown stream '{other}'"
            )));
        }
        (None, None) => return Ok(None),
    };

    if let Some(format) = &settings.format {
        destination.set_formatter(Arc::new(TemplateFormatter::new(format)));
    }
    Ok(Some(Arc::new(destination)))
}
