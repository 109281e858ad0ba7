//! Pluggable record construction, so embedders can stamp every record with their own data.

use super::{LogOptions, Record};
use crate::level::Level;

/// Everything a logger knows about a call before the record exists.
#[derive(Debug, Clone)]
pub struct RecordParts {
    pub level: Level,
    /// Name resolved through the owning context's level registry.
    pub level_name: String,
    pub scope: String,
    pub msg: String,
    pub options: LogOptions,
}

/// Builds records for every logger of a manager.
pub trait RecordFactory: Send + Sync {
    /// # Errors
    /// Whatever record construction rejects, typically
    /// [`Error::AttributeCollision`](crate::Error::AttributeCollision).
    fn make(&self, parts: RecordParts) -> Result<Record, crate::Error>;
}

/// Plain [`Record::new`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultRecordFactory;

impl RecordFactory for DefaultRecordFactory {
    fn make(&self, parts: RecordParts) -> Result<Record, crate::Error> {
        Record::new(parts)
    }
}

impl<F> RecordFactory for F
where
    F: Fn(RecordParts) -> Result<Record, crate::Error> + Send + Sync,
{
    fn make(&self, parts: RecordParts) -> Result<Record, crate::Error> {
        self(parts)
    }
}
