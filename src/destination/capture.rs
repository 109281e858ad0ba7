//! In-memory sink. Keeps every record it is handed together with its formatted line,
//! which is what tests and embedders that re-route output usually want.

use super::{Destination, DestinationCore};
use crate::level::Level;
use crate::record::Record;
use crate::sync;
use std::sync::Mutex;

#[derive(Debug, Default)]
pub struct CaptureDestination {
    core: DestinationCore,
    captured: Mutex<Vec<(Record, String)>>,
}

impl CaptureDestination {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_threshold(level: Level) -> Self {
        Self {
            core: DestinationCore::new(level),
            captured: Mutex::default(),
        }
    }

    #[must_use]
    pub fn records(&self) -> Vec<Record> {
        sync::lock(&self.captured)
            .iter()
            .map(|(record, _)| record.clone())
            .collect()
    }

    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        sync::lock(&self.captured)
            .iter()
            .map(|(_, line)| line.clone())
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        sync::lock(&self.captured).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        sync::lock(&self.captured).clear();
    }
}

impl Destination for CaptureDestination {
    fn core(&self) -> &DestinationCore {
        &self.core
    }

    fn emit(&self, record: &Record) -> Result<(), crate::Error> {
        let line = self.core.format(record);
        sync::lock(&self.captured).push((record.clone(), line));
        Ok(())
    }
}
