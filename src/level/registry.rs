//! Bidirectional level number ↔ name table, mutable at runtime.

use super::{Level, LevelSpec};
use crate::sync;
use std::collections::HashMap;
use std::sync::RwLock;

/// Result of the combined name/number lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelLookup {
    /// A name was resolved to its number.
    Number(Level),
    /// A number was resolved to its name, or the query was unknown and this is the
    /// descriptive `"Level <query>"` stand-in.
    Name(String),
}

#[derive(Debug, Default)]
struct Tables {
    by_number: HashMap<Level, String>,
    by_name: HashMap<String, Level>,
}

/// Two mappings kept in step by [`register`](Self::register).
///
/// Re-registering a number under a new name leaves the old name resolving to that
/// number; nothing is ever removed.
#[derive(Debug)]
pub struct LevelRegistry {
    tables: RwLock<Tables>,
}

impl Default for LevelRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl LevelRegistry {
    /// Seeded with the reserved levels plus the `WARN` and `FATAL` synonyms.
    #[must_use]
    pub fn new() -> Self {
        let mut tables = Tables::default();
        for level in Level::all() {
            if let Some(name) = level.canonical_name() {
                tables.by_number.insert(level, name.to_string());
                tables.by_name.insert(name.to_string(), level);
            }
        }
        tables.by_name.insert("WARN".to_string(), Level::WARNING);
        tables.by_name.insert("FATAL".to_string(), Level::CRITICAL);

        Self {
            tables: RwLock::new(tables),
        }
    }

    /// Registered name, or `"Level <n>"` for numbers nobody named.
    #[must_use]
    pub fn name_of(&self, level: Level) -> String {
        sync::read(&self.tables)
            .by_number
            .get(&level)
            .cloned()
            .unwrap_or_else(|| format!("Level {}", level.value()))
    }

    /// Registered number for `name`. Names are case-sensitive.
    #[must_use]
    pub fn number_of(&self, name: &str) -> Option<Level> {
        sync::read(&self.tables).by_name.get(name).copied()
    }

    /// Both directions through one entry point: numbers map to names, names to numbers,
    /// and anything unknown comes back as a descriptive name rather than an error.
    #[must_use]
    pub fn lookup(&self, query: &LevelSpec) -> LevelLookup {
        match query {
            LevelSpec::Number(n) => LevelLookup::Name(self.name_of(Level::new(*n))),
            LevelSpec::Name(name) => self
                .number_of(name)
                .map_or_else(|| LevelLookup::Name(format!("Level {name}")), LevelLookup::Number),
        }
    }

    /// Last write wins in both directions.
    pub fn register(&self, level: Level, name: impl Into<String>) {
        let name = name.into();
        let mut tables = sync::write(&self.tables);
        tables.by_number.insert(level, name.clone());
        tables.by_name.insert(name, level);
    }

    /// Numbers pass through; names must already be registered.
    ///
    /// # Errors
    /// [`Error::UnknownLevel`](crate::Error::UnknownLevel) for an unregistered name.
    pub fn validate(&self, spec: impl Into<LevelSpec>) -> Result<Level, crate::Error> {
        match spec.into() {
            LevelSpec::Number(n) => Ok(Level::new(n)),
            LevelSpec::Name(name) => self
                .number_of(&name)
                .ok_or(crate::Error::UnknownLevel(name)),
        }
    }

    /// Config files store levels as loosely-typed TOML values.
    ///
    /// # Errors
    /// [`Error::InvalidLevelType`](crate::Error::InvalidLevelType) for anything but a
    /// non-negative integer or a string, otherwise as [`validate`](Self::validate).
    pub fn validate_value(&self, value: &toml::Value) -> Result<Level, crate::Error> {
        self.validate(LevelSpec::try_from(value)?)
    }

    /// Snapshot of the name → number direction, synonyms and stale names included.
    #[must_use]
    pub fn names_mapping(&self) -> HashMap<String, Level> {
        sync::read(&self.tables).by_name.clone()
    }
}
