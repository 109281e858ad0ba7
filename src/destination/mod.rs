//! Destinations are the sinks loggers hand records to. The core only relies on the
//! [`Destination`] contract; concrete sinks supply `emit`.

mod capture;
mod stream;
mod table;

pub use capture::CaptureDestination;
pub use stream::{FileMode, StreamDestination};
pub use table::DestinationTable;

use crate::filter::{Filter, FilterChain};
use crate::fmt::{Format, TemplateFormatter};
use crate::level::Level;
use crate::record::Record;
use crate::sync;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex, RwLock, Weak};

/// State every destination carries regardless of where it writes.
#[derive(Default)]
pub struct DestinationCore {
    threshold: AtomicU32,
    filters: FilterChain,
    formatter: RwLock<Option<Arc<dyn Format>>>,
    name: RwLock<Option<String>>,
    table: Mutex<Option<Weak<DestinationTable>>>,
    closed: AtomicBool,
    emit_lock: Mutex<()>,
}

impl std::fmt::Debug for DestinationCore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DestinationCore")
            .field("threshold", &self.threshold())
            .field("filters", &self.filters)
            .field("name", &self.name())
            .field("closed", &self.is_closed())
            .finish_non_exhaustive()
    }
}

impl DestinationCore {
    #[must_use]
    pub fn new(threshold: Level) -> Self {
        Self {
            threshold: AtomicU32::new(threshold.value()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn threshold(&self) -> Level {
        Level::new(self.threshold.load(Ordering::Relaxed))
    }

    pub fn set_threshold(&self, level: Level) {
        self.threshold.store(level.value(), Ordering::Relaxed);
    }

    #[must_use]
    pub const fn filters(&self) -> &FilterChain {
        &self.filters
    }

    #[must_use]
    pub fn formatter(&self) -> Option<Arc<dyn Format>> {
        sync::read(&self.formatter).clone()
    }

    pub fn set_formatter(&self, formatter: Arc<dyn Format>) {
        *sync::write(&self.formatter) = Some(formatter);
    }

    /// Formats with the configured formatter, or the default template when none is set.
    #[must_use]
    pub fn format(&self, record: &Record) -> String {
        match self.formatter() {
            Some(formatter) => formatter.format(record),
            None => TemplateFormatter::default().format(record),
        }
    }

    #[must_use]
    pub fn name(&self) -> Option<String> {
        sync::read(&self.name).clone()
    }

    pub(crate) fn set_name(&self, name: &str, table: &Arc<DestinationTable>) {
        *sync::write(&self.name) = Some(name.to_string());
        *sync::lock(&self.table) = Some(Arc::downgrade(table));
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Marks the destination closed and drops its name from the lookup table it was
    /// registered in. Loggers it is attached to keep it.
    pub fn close(&self) {
        self.closed.store(true, Ordering::Release);
        let table = sync::lock(&self.table).take();
        if let (Some(table), Some(name)) = (table.and_then(|t| t.upgrade()), self.name()) {
            table.remove(&name);
        }
    }
}

/// A sink with its own threshold, filters, and formatter.
///
/// Implementors provide [`core`](Self::core) and [`emit`](Self::emit); the rest has
/// working defaults.
pub trait Destination: Send + Sync {
    fn core(&self) -> &DestinationCore;

    /// Writes one record that already passed the threshold and filters.
    ///
    /// # Errors
    /// [`Error::NotImplemented`](crate::Error::NotImplemented) unless overridden;
    /// concrete sinks report their own failures.
    fn emit(&self, record: &Record) -> Result<(), crate::Error> {
        let _ = record;
        Err(crate::Error::NotImplemented("emit"))
    }

    /// # Errors
    /// I/O failures from buffered sinks.
    fn flush(&self) -> Result<(), crate::Error> {
        Ok(())
    }

    /// Decides what happens to an `emit` failure: swallowed, or handed back when
    /// `raise_errors` is set.
    ///
    /// # Errors
    /// Returns `err` when `raise_errors` is true.
    fn handle_error(
        &self,
        record: &Record,
        err: crate::Error,
        raise_errors: bool,
    ) -> Result<(), crate::Error> {
        let _ = record;
        if raise_errors { Err(err) } else { Ok(()) }
    }

    fn close(&self) {
        self.core().close();
    }

    /// Filters, then emits under the destination's lock. Returns whether the record
    /// was emitted.
    ///
    /// # Errors
    /// Only what [`handle_error`](Self::handle_error) passes on.
    fn handle(&self, record: &Record, raise_errors: bool) -> Result<bool, crate::Error> {
        let Some(record) = self.core().filters().apply(record) else {
            return Ok(false);
        };
        let result = {
            let _guard = sync::lock(&self.core().emit_lock);
            self.emit(&record)
        };
        match result {
            Ok(()) => Ok(true),
            Err(err) => self.handle_error(&record, err, raise_errors).map(|()| true),
        }
    }

    fn threshold(&self) -> Level {
        self.core().threshold()
    }

    fn set_threshold(&self, level: Level) {
        self.core().set_threshold(level);
    }

    fn add_filter(&self, filter: Arc<dyn Filter>) {
        self.core().filters().add(filter);
    }

    fn remove_filter(&self, filter: &Arc<dyn Filter>) {
        self.core().filters().remove(filter);
    }

    fn set_formatter(&self, formatter: Arc<dyn Format>) {
        self.core().set_formatter(formatter);
    }
}
