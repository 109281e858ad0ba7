//! The process-scoped state a logger tree runs against: level names, the manager, the
//! destination table, the last-resort sink, and the error policy flags.
//!
//! Applications normally use the lazily-built [`global`] context; tests and embedders
//! that need isolation build their own with [`Context::new`].

use crate::destination::{Destination, DestinationTable, StreamDestination};
use crate::fmt::TemplateFormatter;
use crate::internal;
use crate::level::{Level, LevelRegistry};
use crate::logger::{BasicConfig, Logger};
use crate::manager::Manager;
use crate::sync;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock, RwLock};

pub(crate) struct Shared {
    pub(crate) levels: LevelRegistry,
    pub(crate) manager: Manager,
    pub(crate) destinations: Arc<DestinationTable>,
    last_resort: RwLock<Option<Arc<dyn Destination>>>,
    raise_errors: AtomicBool,
    warn_missing_destinations: AtomicBool,
}

impl Shared {
    pub(crate) fn last_resort(&self) -> Option<Arc<dyn Destination>> {
        sync::read(&self.last_resort).clone()
    }

    pub(crate) fn raise_errors(&self) -> bool {
        self.raise_errors.load(Ordering::Relaxed)
    }

    pub(crate) fn warn_missing_destinations(&self) -> bool {
        self.warn_missing_destinations.load(Ordering::Relaxed)
    }
}

/// Cheap-to-clone handle on one logger tree and everything it needs.
#[derive(Clone)]
pub struct Context {
    shared: Arc<Shared>,
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("manager", &self.shared.manager)
            .field("raise_errors", &self.raise_errors())
            .finish_non_exhaustive()
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

/// The stderr sink used when a record finds no destination: bare message, `WARNING`
/// and up.
fn default_last_resort() -> Arc<dyn Destination> {
    let destination = StreamDestination::stderr().with_threshold(Level::WARNING);
    destination.set_formatter(Arc::new(TemplateFormatter::new("{msg}")));
    Arc::new(destination)
}

impl Context {
    /// Fresh tree with the reserved level names, a `WARNING` root, and the stderr last
    /// resort.
    #[must_use]
    pub fn new() -> Self {
        let shared = Arc::new_cyclic(|weak| Shared {
            levels: LevelRegistry::new(),
            manager: Manager::new(weak.clone()),
            destinations: Arc::new(DestinationTable::new()),
            last_resort: RwLock::new(Some(default_last_resort())),
            raise_errors: AtomicBool::new(false),
            warn_missing_destinations: AtomicBool::new(true),
        });
        Self { shared }
    }

    pub(crate) const fn from_shared(shared: Arc<Shared>) -> Self {
        Self { shared }
    }

    #[must_use]
    pub fn levels(&self) -> &LevelRegistry {
        &self.shared.levels
    }

    #[must_use]
    pub fn manager(&self) -> &Manager {
        &self.shared.manager
    }

    #[must_use]
    pub fn root(&self) -> Arc<Logger> {
        self.shared.manager.root()
    }

    #[must_use]
    pub fn get_logger(&self, scope: &str) -> Arc<Logger> {
        self.shared.manager.get_logger(scope)
    }

    pub fn register_level(&self, level: Level, name: impl Into<String>) {
        self.shared.levels.register(level, name);
    }

    #[must_use]
    pub fn level_name(&self, level: Level) -> String {
        self.shared.levels.name_of(level)
    }

    /// Drops every record at or below `level`, whatever the loggers say.
    pub fn disable(&self, level: Level) {
        self.shared.manager.set_disable_threshold(level);
    }

    #[must_use]
    pub fn last_resort(&self) -> Option<Arc<dyn Destination>> {
        self.shared.last_resort()
    }

    /// `None` turns the fallback off, enabling the one-shot "no destinations" notice.
    pub fn set_last_resort(&self, destination: Option<Arc<dyn Destination>>) {
        *sync::write(&self.shared.last_resort) = destination;
    }

    #[must_use]
    pub fn raise_errors(&self) -> bool {
        self.shared.raise_errors()
    }

    /// When on, destination failures come back from [`Logger::try_log`] instead of
    /// being swallowed.
    pub fn set_raise_errors(&self, raise: bool) {
        self.shared.raise_errors.store(raise, Ordering::Relaxed);
    }

    #[must_use]
    pub fn warn_missing_destinations(&self) -> bool {
        self.shared.warn_missing_destinations()
    }

    pub fn set_warn_missing_destinations(&self, warn: bool) {
        self.shared
            .warn_missing_destinations
            .store(warn, Ordering::Relaxed);
    }

    /// Makes `destination` findable by `name` until it is closed or dropped.
    pub fn register_destination(&self, name: &str, destination: &Arc<dyn Destination>) {
        self.shared.destinations.register(name, destination);
    }

    #[must_use]
    pub fn destination(&self, name: &str) -> Option<Arc<dyn Destination>> {
        self.shared.destinations.get(name)
    }

    #[must_use]
    pub fn destination_names(&self) -> Vec<String> {
        self.shared.destinations.names()
    }

    /// Sets up the root logger in one call.
    ///
    /// # Errors
    /// [`Error::ConflictingConfig`](crate::Error::ConflictingConfig) for combined
    /// targets, I/O errors from opening a log file.
    pub fn configure_root(&self, config: BasicConfig) -> Result<(), crate::Error> {
        config.apply(&self.root())
    }

    /// Flushes and closes every destination attached through this context, newest
    /// first. Loggers stay in place.
    pub fn shutdown(&self) {
        for destination in self.shared.destinations.tracked() {
            if let Err(e) = destination.flush() {
                internal::warn("shutdown", &format!("flush failed: {e}"));
            }
            destination.close();
        }
        if let Some(last_resort) = self.last_resort()
            && let Err(e) = last_resort.flush()
        {
            internal::warn("shutdown", &format!("last resort flush failed: {e}"));
        }
    }
}

static GLOBAL: OnceLock<Context> = OnceLock::new();

/// The process-wide context behind the free functions.
pub fn global() -> &'static Context {
    GLOBAL.get_or_init(Context::new)
}

/// Logger for `scope` in the [`global`] context.
#[must_use]
pub fn get_logger(scope: &str) -> Arc<Logger> {
    global().get_logger(scope)
}

/// Root logger of the [`global`] context.
#[must_use]
pub fn root() -> Arc<Logger> {
    global().root()
}

/// Root-level logging that sets the root up with defaults on first use.
fn log_root(level: Level, msg: String) {
    let root = root();
    if root.destinations().is_empty()
        && let Err(e) = global().configure_root(BasicConfig::new())
    {
        internal::error("config", &format!("default root setup failed: {e}"));
    }
    root.log(level, msg);
}

pub fn debug(msg: impl Into<String>) {
    log_root(Level::DEBUG, msg.into());
}

pub fn info(msg: impl Into<String>) {
    log_root(Level::INFO, msg.into());
}

pub fn warning(msg: impl Into<String>) {
    log_root(Level::WARNING, msg.into());
}

pub fn error(msg: impl Into<String>) {
    log_root(Level::ERROR, msg.into());
}

pub fn critical(msg: impl Into<String>) {
    log_root(Level::CRITICAL, msg.into());
}
