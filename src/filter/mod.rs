//! Record filtering shared by loggers and destinations.
//!
//! A filter sees every record that passed the level gate and may drop it, let it
//! through, or swap in a modified copy that later filters (and the emitter) receive.

use crate::record::Record;
use crate::sync;
use std::borrow::Cow;
use std::sync::{Arc, RwLock};

/// Verdict of a single filter.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterOutcome {
    Pass,
    Reject,
    /// Pass, continuing with this record instead of the original.
    Replace(Record),
}

impl From<bool> for FilterOutcome {
    fn from(keep: bool) -> Self {
        if keep { Self::Pass } else { Self::Reject }
    }
}

/// Single-method capability every filter implements.
pub trait Filter: Send + Sync {
    fn filter(&self, record: &Record) -> FilterOutcome;
}

/// Passes records from one branch of the hierarchy.
///
/// An empty scope passes everything; otherwise the record's scope must equal the
/// filter's scope or continue it past a dot (`a.b` passes `a.b.c`, not `a.bc`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeFilter {
    scope: String,
}

impl ScopeFilter {
    #[must_use]
    pub fn new(scope: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
        }
    }

    #[must_use]
    pub fn scope(&self) -> &str {
        &self.scope
    }

    #[must_use]
    pub fn matches(&self, record: &Record) -> bool {
        if self.scope.is_empty() {
            return true;
        }
        let scope = record.scope();
        scope == self.scope
            || scope
                .strip_prefix(self.scope.as_str())
                .is_some_and(|rest| rest.starts_with('.'))
    }
}

impl Filter for ScopeFilter {
    fn filter(&self, record: &Record) -> FilterOutcome {
        self.matches(record).into()
    }
}

/// Wraps a plain predicate so it can sit in a [`FilterChain`].
pub struct PredicateFilter<F> {
    predicate: F,
}

impl<F> Filter for PredicateFilter<F>
where
    F: Fn(&Record) -> bool + Send + Sync,
{
    fn filter(&self, record: &Record) -> FilterOutcome {
        (self.predicate)(record).into()
    }
}

/// Adapts a predicate into a shareable filter.
pub fn filter_fn<F>(predicate: F) -> Arc<dyn Filter>
where
    F: Fn(&Record) -> bool + Send + Sync + 'static,
{
    Arc::new(PredicateFilter { predicate })
}

/// Ordered, identity-keyed set of filters.
#[derive(Default)]
pub struct FilterChain {
    filters: RwLock<Vec<Arc<dyn Filter>>>,
}

impl std::fmt::Debug for FilterChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterChain")
            .field("len", &self.len())
            .finish()
    }
}

/// Identity of the allocation, ignoring vtable differences between codegen units.
pub(crate) fn same_object<T: ?Sized>(a: &Arc<T>, b: &Arc<T>) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

impl FilterChain {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends unless this exact filter is already present.
    pub fn add(&self, filter: Arc<dyn Filter>) {
        let mut filters = sync::write(&self.filters);
        if !filters.iter().any(|f| same_object(f, &filter)) {
            filters.push(filter);
        }
    }

    /// Removes this exact filter if present.
    pub fn remove(&self, filter: &Arc<dyn Filter>) {
        sync::write(&self.filters).retain(|f| !same_object(f, filter));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        sync::read(&self.filters).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Runs the filters in insertion order. `None` means drop; otherwise the record to
    /// continue with, borrowed when nothing replaced it.
    #[must_use]
    pub fn apply<'r>(&self, record: &'r Record) -> Option<Cow<'r, Record>> {
        let filters = sync::read(&self.filters).clone();
        let mut current = Cow::Borrowed(record);
        for filter in filters {
            match filter.filter(&current) {
                FilterOutcome::Pass => {}
                FilterOutcome::Reject => return None,
                FilterOutcome::Replace(replacement) => current = Cow::Owned(replacement),
            }
        }
        Some(current)
    }
}
