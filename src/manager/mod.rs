//! Owner of one logger tree.
//!
//! Scopes map either to a real logger or to a placeholder that exists only because a
//! deeper logger was created first. When a logger finally appears at a placeholder's
//! scope, the descendants the placeholder collected are re-parented onto it.

use crate::context::Shared;
use crate::internal;
use crate::level::Level;
use crate::logger::Logger;
use crate::record::{DefaultRecordFactory, RecordFactory};
use crate::sync;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex, RwLock, Weak};

/// Builds the logger nodes a manager hands out.
pub trait LoggerFactory: Send + Sync {
    /// A fresh node for `scope`, typically `Logger::new(scope)` plus presets.
    fn create(&self, scope: &str) -> Logger;
}

impl<F> LoggerFactory for F
where
    F: Fn(&str) -> Logger + Send + Sync,
{
    fn create(&self, scope: &str) -> Logger {
        self(scope)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultLoggerFactory;

impl LoggerFactory for DefaultLoggerFactory {
    fn create(&self, scope: &str) -> Logger {
        Logger::new(scope)
    }
}

/// Descendants waiting for a logger to be created at this scope.
#[derive(Default)]
struct Placeholder {
    children: Vec<Weak<Logger>>,
}

impl Placeholder {
    fn with(logger: &Arc<Logger>) -> Self {
        Self {
            children: vec![Arc::downgrade(logger)],
        }
    }

    fn append(&mut self, logger: &Arc<Logger>) {
        let ptr = Arc::as_ptr(logger);
        if !self.children.iter().any(|c| std::ptr::eq(c.as_ptr(), ptr)) {
            self.children.push(Arc::downgrade(logger));
        }
    }
}

enum Node {
    Logger(Arc<Logger>),
    Placeholder(Placeholder),
}

/// Scope string probed when a custom factory is installed.
const FACTORY_PROBE_SCOPE: &str = "scopelog.factory-probe";

pub struct Manager {
    owner: Weak<Shared>,
    root: Arc<Logger>,
    nodes: Mutex<HashMap<String, Node>>,
    disable: AtomicU32,
    no_destination_warned: AtomicBool,
    logger_factory: RwLock<Arc<dyn LoggerFactory>>,
    record_factory: RwLock<Arc<dyn RecordFactory>>,
}

impl std::fmt::Debug for Manager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Manager")
            .field("root", &self.root)
            .field("scopes", &self.scopes())
            .field("disable", &self.disable_threshold())
            .finish_non_exhaustive()
    }
}

impl Manager {
    pub(crate) fn new(owner: Weak<Shared>) -> Self {
        let root = Arc::new(Logger::root());
        root.attach(owner.clone());
        Self {
            owner,
            root,
            nodes: Mutex::new(HashMap::new()),
            disable: AtomicU32::new(Level::NOTSET.value()),
            no_destination_warned: AtomicBool::new(false),
            logger_factory: RwLock::new(Arc::new(DefaultLoggerFactory)),
            record_factory: RwLock::new(Arc::new(DefaultRecordFactory)),
        }
    }

    #[must_use]
    pub fn root(&self) -> Arc<Logger> {
        Arc::clone(&self.root)
    }

    /// The logger for `scope`, created on first request. The empty scope is the root.
    /// Repeated calls return the same node.
    #[must_use]
    pub fn get_logger(&self, scope: &str) -> Arc<Logger> {
        if scope.is_empty() {
            return self.root();
        }
        if let Some(Node::Logger(existing)) = sync::lock(&self.nodes).get(scope) {
            return Arc::clone(existing);
        }

        // The factory is user code and may itself ask for loggers, so it runs unlocked.
        let factory = Arc::clone(&*sync::read(&self.logger_factory));
        let fresh = Arc::new(factory.create(scope));
        fresh.attach(self.owner.clone());

        let mut nodes = sync::lock(&self.nodes);
        if let Some(Node::Logger(existing)) = nodes.get(scope) {
            return Arc::clone(existing);
        }
        let previous = nodes.insert(scope.to_string(), Node::Logger(Arc::clone(&fresh)));
        if let Some(Node::Placeholder(placeholder)) = previous {
            Self::fixup_children(&placeholder, &fresh);
        }
        self.fixup_parents(&mut nodes, &fresh);
        drop(nodes);

        internal::debug("manager", &format!("Created logger '{scope}'"));
        fresh
    }

    /// Links `logger` to its nearest existing ancestor, leaving placeholders on the
    /// empty scopes in between so a later logger there can adopt it.
    fn fixup_parents(&self, nodes: &mut HashMap<String, Node>, logger: &Arc<Logger>) {
        let scope = logger.scope();
        let mut parent = None;
        let mut end = scope.rfind('.');

        while let Some(i) = end.filter(|&i| i > 0) {
            let prefix = &scope[..i];
            match nodes.get_mut(prefix) {
                None => {
                    nodes.insert(prefix.to_string(), Node::Placeholder(Placeholder::with(logger)));
                }
                Some(Node::Logger(existing)) => {
                    parent = Some(Arc::clone(existing));
                    break;
                }
                Some(Node::Placeholder(placeholder)) => placeholder.append(logger),
            }
            end = prefix.rfind('.');
        }

        logger.set_parent(parent.as_ref().unwrap_or(&self.root));
    }

    /// Re-parents every descendant whose current parent sits above `logger`.
    fn fixup_children(placeholder: &Placeholder, logger: &Arc<Logger>) {
        let scope = logger.scope();
        for child in placeholder.children.iter().filter_map(Weak::upgrade) {
            let Some(parent) = child.parent() else {
                continue;
            };
            if !parent.scope().starts_with(scope) {
                child.set_parent(logger);
            }
        }
    }

    /// Whether `scope` is currently held only by a placeholder.
    #[must_use]
    pub fn is_placeholder(&self, scope: &str) -> bool {
        matches!(sync::lock(&self.nodes).get(scope), Some(Node::Placeholder(_)))
    }

    /// Every created logger except the root, sorted by scope.
    #[must_use]
    pub fn loggers(&self) -> Vec<Arc<Logger>> {
        let mut loggers: Vec<Arc<Logger>> = sync::lock(&self.nodes)
            .values()
            .filter_map(|node| match node {
                Node::Logger(logger) => Some(Arc::clone(logger)),
                Node::Placeholder(_) => None,
            })
            .collect();
        loggers.sort_by(|a, b| a.scope().cmp(b.scope()));
        loggers
    }

    /// Scopes of every created logger except the root, sorted.
    #[must_use]
    pub fn scopes(&self) -> Vec<String> {
        self.loggers()
            .iter()
            .map(|logger| logger.scope().to_string())
            .collect()
    }

    /// Records at or below this level are dropped everywhere in the tree.
    #[must_use]
    pub fn disable_threshold(&self) -> Level {
        Level::new(self.disable.load(Ordering::Relaxed))
    }

    pub fn set_disable_threshold(&self, level: Level) {
        self.disable.store(level.value(), Ordering::Relaxed);
        self.clear_cache();
    }

    /// Drops every cached enablement answer in the tree.
    pub fn clear_cache(&self) {
        self.root.clear_cache();
        for node in sync::lock(&self.nodes).values() {
            if let Node::Logger(logger) = node {
                logger.clear_cache();
            }
        }
    }

    /// Replaces the constructor for loggers created from now on.
    ///
    /// The factory is called once with a probe scope; it must return a detached,
    /// non-root logger for exactly that scope.
    ///
    /// # Errors
    /// [`Error::TypeConstraint`](crate::Error::TypeConstraint) when the probe fails.
    pub fn set_logger_factory(&self, factory: Arc<dyn LoggerFactory>) -> Result<(), crate::Error> {
        let probe = factory.create(FACTORY_PROBE_SCOPE);
        if probe.scope() != FACTORY_PROBE_SCOPE {
            return Err(crate::Error::TypeConstraint(format!(
                "asked for '{FACTORY_PROBE_SCOPE}', got a logger for '{}'",
                probe.scope()
            )));
        }
        if probe.is_root() || probe.is_attached() || probe.parent().is_some() {
            return Err(crate::Error::TypeConstraint(
                "factory must return a fresh, unlinked logger".to_string(),
            ));
        }
        *sync::write(&self.logger_factory) = factory;
        Ok(())
    }

    pub fn set_record_factory(&self, factory: Arc<dyn RecordFactory>) {
        *sync::write(&self.record_factory) = factory;
    }

    #[must_use]
    pub fn record_factory(&self) -> Arc<dyn RecordFactory> {
        Arc::clone(&*sync::read(&self.record_factory))
    }

    /// Whether the one-shot "no destinations" notice has been printed.
    #[must_use]
    pub fn emitted_no_destination_warning(&self) -> bool {
        self.no_destination_warned.load(Ordering::Acquire)
    }

    /// True exactly once per manager.
    pub(crate) fn mark_no_destination_warning(&self) -> bool {
        !self.no_destination_warned.swap(true, Ordering::AcqRel)
    }
}

#[cfg(test)]
mod tests {
    use crate::Context;

    #[test]
    fn intermediate_scopes_start_as_placeholders() {
        let ctx = Context::new();
        let _ = ctx.get_logger("a.b.c");

        assert!(ctx.manager().is_placeholder("a"));
        assert!(ctx.manager().is_placeholder("a.b"));
        assert!(!ctx.manager().is_placeholder("a.b.c"));

        let _ = ctx.get_logger("a.b");
        assert!(!ctx.manager().is_placeholder("a.b"));
        assert_eq!(ctx.manager().scopes(), vec!["a.b", "a.b.c"]);
    }

    #[test]
    fn no_destination_notice_fires_once() {
        let ctx = Context::new();
        assert!(ctx.manager().mark_no_destination_warning());
        assert!(!ctx.manager().mark_no_destination_warning());
        assert!(!ctx.manager().mark_no_destination_warning());
    }

    #[test]
    fn unrouted_record_consumes_the_notice() {
        let ctx = Context::new();
        ctx.set_last_resort(None);

        ctx.get_logger("a").error("nowhere");
        assert!(ctx.manager().emitted_no_destination_warning());
        assert!(!ctx.manager().mark_no_destination_warning());

        ctx.get_logger("b").error("still nowhere");
        assert!(!ctx.manager().mark_no_destination_warning());
    }
}
