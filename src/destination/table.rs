//! Name lookup and shutdown bookkeeping for destinations. Entries are weak, so a
//! destination nobody holds any more simply disappears from both lists.

use super::Destination;
use crate::filter::same_object;
use crate::sync;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, Weak};

#[derive(Default)]
pub struct DestinationTable {
    named: Mutex<HashMap<String, Weak<dyn Destination>>>,
    tracked: Mutex<Vec<Weak<dyn Destination>>>,
}

impl std::fmt::Debug for DestinationTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DestinationTable")
            .field("names", &self.names())
            .finish_non_exhaustive()
    }
}

impl DestinationTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `name` to `destination`, replacing any earlier holder of the name.
    pub fn register(self: &Arc<Self>, name: &str, destination: &Arc<dyn Destination>) {
        destination.core().set_name(name, self);
        sync::lock(&self.named).insert(name.to_string(), Arc::downgrade(destination));
        self.track(destination);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<dyn Destination>> {
        let mut named = sync::lock(&self.named);
        let found = named.get(name).and_then(Weak::upgrade);
        if found.is_none() {
            named.remove(name);
        }
        found
    }

    pub(crate) fn remove(&self, name: &str) {
        sync::lock(&self.named).remove(name);
    }

    /// Live names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut named = sync::lock(&self.named);
        named.retain(|_, weak| weak.strong_count() > 0);
        let mut names: Vec<String> = named.keys().cloned().collect();
        names.sort();
        names
    }

    /// Remembers a destination for [`shutdown`](crate::Context::shutdown).
    pub fn track(&self, destination: &Arc<dyn Destination>) {
        let mut tracked = sync::lock(&self.tracked);
        tracked.retain(|weak| weak.strong_count() > 0);
        let known = tracked
            .iter()
            .filter_map(Weak::upgrade)
            .any(|d| same_object(&d, destination));
        if !known {
            tracked.push(Arc::downgrade(destination));
        }
    }

    /// Live tracked destinations, most recently tracked first.
    #[must_use]
    pub fn tracked(&self) -> Vec<Arc<dyn Destination>> {
        sync::lock(&self.tracked)
            .iter()
            .rev()
            .filter_map(Weak::upgrade)
            .collect()
    }
}
