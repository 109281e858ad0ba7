//! Logger nodes. Each logger is keyed by a dot-separated scope, resolves its effective
//! level through its ancestors, and fans records out to its own destinations and then
//! to its ancestors' until a node stops propagation.

mod builder;

pub use builder::BasicConfig;

use crate::context::{Context, Shared};
use crate::destination::Destination;
use crate::filter::{Filter, FilterChain, same_object};
use crate::internal;
use crate::level::Level;
use crate::record::{LogOptions, Record, RecordParts};
use crate::sync;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex, OnceLock, RwLock, Weak};

/// A node in the logger tree.
///
/// Obtain loggers through [`Context::get_logger`]; building one with [`Logger::new`] is
/// only useful inside a custom [`LoggerFactory`](crate::LoggerFactory).
pub struct Logger {
    scope: String,
    level: AtomicU32,
    is_root: bool,
    parent: RwLock<Option<Weak<Logger>>>,
    propagate: AtomicBool,
    disabled: AtomicBool,
    destinations: RwLock<Vec<Arc<dyn Destination>>>,
    filters: FilterChain,
    cache: Mutex<HashMap<Level, bool>>,
    context: OnceLock<Weak<Shared>>,
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("scope", &self.scope)
            .field("level", &self.level())
            .field("propagate", &self.propagate())
            .field("disabled", &self.disabled())
            .field("destinations", &sync::read(&self.destinations).len())
            .finish_non_exhaustive()
    }
}

impl Logger {
    /// Detached node with level `NOTSET`, propagation on, and no destinations.
    #[must_use]
    pub fn new(scope: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
            level: AtomicU32::new(Level::NOTSET.value()),
            is_root: false,
            parent: RwLock::new(None),
            propagate: AtomicBool::new(true),
            disabled: AtomicBool::new(false),
            destinations: RwLock::new(Vec::new()),
            filters: FilterChain::new(),
            cache: Mutex::new(HashMap::new()),
            context: OnceLock::new(),
        }
    }

    pub(crate) fn root() -> Self {
        Self {
            is_root: true,
            level: AtomicU32::new(Level::WARNING.value()),
            ..Self::new("")
        }
    }

    /// Initial level for factory-built loggers.
    #[must_use]
    pub fn with_level(self, level: Level) -> Self {
        self.level.store(level.value(), Ordering::Relaxed);
        self
    }

    /// Initial propagation for factory-built loggers.
    #[must_use]
    pub fn with_propagate(self, propagate: bool) -> Self {
        self.propagate.store(propagate, Ordering::Relaxed);
        self
    }

    /// Initial destination for factory-built loggers.
    #[must_use]
    pub fn with_destination(self, destination: Arc<dyn Destination>) -> Self {
        sync::write(&self.destinations).push(destination);
        self
    }

    pub(crate) fn attach(&self, shared: Weak<Shared>) {
        let _ = self.context.set(shared);
    }

    pub(crate) fn is_attached(&self) -> bool {
        self.context.get().is_some()
    }

    fn shared(&self) -> Option<Arc<Shared>> {
        self.context.get().and_then(Weak::upgrade)
    }

    /// The context this logger belongs to, while it is alive.
    #[must_use]
    pub fn context(&self) -> Option<Context> {
        self.shared().map(Context::from_shared)
    }

    /// Dot-separated path; empty for the root.
    #[must_use]
    pub fn scope(&self) -> &str {
        &self.scope
    }

    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.is_root
    }

    #[must_use]
    pub fn parent(&self) -> Option<Arc<Self>> {
        sync::read(&self.parent).as_ref().and_then(Weak::upgrade)
    }

    pub(crate) fn set_parent(&self, parent: &Arc<Self>) {
        *sync::write(&self.parent) = Some(Arc::downgrade(parent));
    }

    /// The explicitly configured level, `NOTSET` when inheriting.
    #[must_use]
    pub fn level(&self) -> Level {
        Level::new(self.level.load(Ordering::Relaxed))
    }

    /// Any level change can flip enablement for descendants too, so every cache in the
    /// owning tree is cleared.
    pub fn set_level(&self, level: Level) {
        self.level.store(level.value(), Ordering::Relaxed);
        match self.shared() {
            Some(shared) => shared.manager.clear_cache(),
            None => self.clear_cache(),
        }
    }

    /// Sets the level from a registered name.
    ///
    /// # Errors
    /// [`Error::UnknownLevel`](crate::Error::UnknownLevel) when the name isn't registered
    /// in the owning context (or isn't a reserved name for a detached logger).
    pub fn set_level_named(&self, name: &str) -> Result<(), crate::Error> {
        let level = match self.shared() {
            Some(shared) => shared.levels.validate(name)?,
            None => name
                .parse()
                .map_err(|_| crate::Error::UnknownLevel(name.to_string()))?,
        };
        self.set_level(level);
        Ok(())
    }

    #[must_use]
    pub fn propagate(&self) -> bool {
        self.propagate.load(Ordering::Relaxed)
    }

    pub fn set_propagate(&self, propagate: bool) {
        self.propagate.store(propagate, Ordering::Relaxed);
    }

    #[must_use]
    pub fn disabled(&self) -> bool {
        self.disabled.load(Ordering::Relaxed)
    }

    pub fn set_disabled(&self, disabled: bool) {
        self.disabled.store(disabled, Ordering::Relaxed);
    }

    pub(crate) fn clear_cache(&self) {
        sync::lock(&self.cache).clear();
    }

    /// First explicit level on the way up, or `NOTSET` if every node inherits.
    #[must_use]
    pub fn effective_level(&self) -> Level {
        let own = self.level();
        if !own.is_notset() {
            return own;
        }
        let mut next = self.parent();
        while let Some(node) = next {
            let level = node.level();
            if !level.is_notset() {
                return level;
            }
            next = node.parent();
        }
        Level::NOTSET
    }

    /// Whether a record at `level` would be created at all.
    #[must_use]
    pub fn is_enabled_for(&self, level: Level) -> bool {
        if self.disabled() {
            return false;
        }
        // Held across the miss so a concurrent clear can't be overwritten by a stale answer.
        let mut cache = sync::lock(&self.cache);
        if let Some(&hit) = cache.get(&level) {
            return hit;
        }

        let threshold = self
            .shared()
            .map_or(Level::NOTSET, |shared| shared.manager.disable_threshold());
        let enabled = threshold < level && level >= self.effective_level();
        cache.insert(level, enabled);
        enabled
    }

    /// Logs unless disabled; failures are reported on the crate's diagnostic channel.
    pub fn log(&self, level: Level, msg: impl Into<String>) {
        self.log_with(level, msg, LogOptions::default());
    }

    pub fn log_with(&self, level: Level, msg: impl Into<String>, options: LogOptions) {
        if let Err(e) = self.try_log(level, msg, options) {
            internal::error(
                "logger",
                &format!("logging call on '{}' failed: {e}", self.scope),
            );
        }
    }

    /// Like [`log_with`](Self::log_with), but hands failures back.
    ///
    /// # Errors
    /// Record construction errors, and the first destination error of the dispatch walk
    /// when the owning context has `raise_errors` on. The walk itself always completes.
    pub fn try_log(
        &self,
        level: Level,
        msg: impl Into<String>,
        options: LogOptions,
    ) -> Result<(), crate::Error> {
        if !self.is_enabled_for(level) {
            return Ok(());
        }
        let Some(shared) = self.shared() else {
            return Ok(());
        };

        let parts = RecordParts {
            level,
            level_name: shared.levels.name_of(level),
            scope: self.scope.clone(),
            msg: msg.into(),
            options,
        };
        let record = shared.manager.record_factory().make(parts)?;
        self.handle_in(&shared, &record)
    }

    /// Runs an already-built record through this logger's filters and dispatches it.
    ///
    /// # Errors
    /// As for [`try_log`](Self::try_log).
    pub fn handle(&self, record: &Record) -> Result<(), crate::Error> {
        match self.shared() {
            Some(shared) => self.handle_in(&shared, record),
            None => Ok(()),
        }
    }

    fn handle_in(&self, shared: &Shared, record: &Record) -> Result<(), crate::Error> {
        if self.disabled() {
            return Ok(());
        }
        let Some(record) = self.filters.apply(record) else {
            return Ok(());
        };
        self.dispatch(shared, &record)
    }

    /// Walks this node and its ancestors, offering the record to every destination whose
    /// threshold it meets, until a node with propagation off has been processed.
    fn dispatch(&self, shared: &Shared, record: &Record) -> Result<(), crate::Error> {
        let raise_errors = shared.raise_errors();
        let mut found = 0usize;
        let mut first_error = None;

        let mut visit = |node: &Self| {
            for destination in node.destinations() {
                found += 1;
                if record.level() >= destination.threshold()
                    && let Err(e) = destination.handle(record, raise_errors)
                {
                    first_error.get_or_insert(e);
                }
            }
            node.propagate()
        };

        if visit(self) {
            let mut next = self.parent();
            while let Some(node) = next {
                if !visit(&node) {
                    break;
                }
                next = node.parent();
            }
        }

        if found == 0 {
            if let Some(last_resort) = shared.last_resort() {
                if record.level() >= last_resort.threshold()
                    && let Err(e) = last_resort.handle(record, raise_errors)
                {
                    first_error.get_or_insert(e);
                }
            } else if shared.warn_missing_destinations()
                && shared.manager.mark_no_destination_warning()
            {
                internal::warn(
                    "hierarchy",
                    &format!("No destinations could be found for logger \"{}\"", self.scope),
                );
            }
        }

        first_error.map_or(Ok(()), Err)
    }

    pub fn debug(&self, msg: impl Into<String>) {
        self.log(Level::DEBUG, msg);
    }

    pub fn info(&self, msg: impl Into<String>) {
        self.log(Level::INFO, msg);
    }

    pub fn warning(&self, msg: impl Into<String>) {
        self.log(Level::WARNING, msg);
    }

    /// Alias of [`warning`](Self::warning).
    pub fn warn(&self, msg: impl Into<String>) {
        self.warning(msg);
    }

    pub fn error(&self, msg: impl Into<String>) {
        self.log(Level::ERROR, msg);
    }

    pub fn critical(&self, msg: impl Into<String>) {
        self.log(Level::CRITICAL, msg);
    }

    /// Alias of [`critical`](Self::critical).
    pub fn fatal(&self, msg: impl Into<String>) {
        self.critical(msg);
    }

    /// Logs at `ERROR` with the error and its source chain attached as `exc_info`.
    pub fn exception(&self, msg: impl Into<String>, err: &(dyn std::error::Error + 'static)) {
        let mut chain = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            chain.push_str("\ncaused by: ");
            chain.push_str(&cause.to_string());
            source = cause.source();
        }
        self.log_with(Level::ERROR, msg, LogOptions::new().exc_info(chain));
    }

    /// Attaches `destination` unless this exact destination is already attached.
    pub fn add_destination(&self, destination: Arc<dyn Destination>) {
        let mut destinations = sync::write(&self.destinations);
        if destinations.iter().any(|d| same_object(d, &destination)) {
            return;
        }
        if let Some(shared) = self.shared() {
            shared.destinations.track(&destination);
        }
        destinations.push(destination);
    }

    pub fn remove_destination(&self, destination: &Arc<dyn Destination>) {
        sync::write(&self.destinations).retain(|d| !same_object(d, destination));
    }

    /// Destinations attached directly to this node, in attachment order.
    #[must_use]
    pub fn destinations(&self) -> Vec<Arc<dyn Destination>> {
        sync::read(&self.destinations).clone()
    }

    /// Whether dispatch from this node would reach any destination at all.
    #[must_use]
    pub fn has_destinations(&self) -> bool {
        if !sync::read(&self.destinations).is_empty() {
            return true;
        }
        if !self.propagate() {
            return false;
        }
        let mut next = self.parent();
        while let Some(node) = next {
            if !sync::read(&node.destinations).is_empty() {
                return true;
            }
            if !node.propagate() {
                return false;
            }
            next = node.parent();
        }
        false
    }

    pub fn add_filter(&self, filter: Arc<dyn Filter>) {
        self.filters.add(filter);
    }

    pub fn remove_filter(&self, filter: &Arc<dyn Filter>) {
        self.filters.remove(filter);
    }

    #[must_use]
    pub const fn filters(&self) -> &FilterChain {
        &self.filters
    }

    /// The logger for `suffix` below this one (`a.b` + `c.d` → `a.b.c.d`).
    #[must_use]
    pub fn get_child(&self, suffix: &str) -> Option<Arc<Self>> {
        let shared = self.shared()?;
        let scope = if self.is_root {
            suffix.to_string()
        } else {
            format!("{}.{suffix}", self.scope)
        };
        Some(shared.manager.get_logger(&scope))
    }

    /// Existing loggers whose parent is this node, sorted by scope.
    #[must_use]
    pub fn children(&self) -> Vec<Arc<Self>> {
        let Some(shared) = self.shared() else {
            return Vec::new();
        };
        shared
            .manager
            .loggers()
            .into_iter()
            .filter(|logger| {
                logger
                    .parent()
                    .is_some_and(|parent| std::ptr::eq(Arc::as_ptr(&parent), self))
            })
            .collect()
    }
}
