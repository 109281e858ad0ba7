//! One-shot root setup. Picks at most one output target (explicit destinations, a file,
//! or a stream), falls back to stderr, and applies a shared format and level.

use super::Logger;
use crate::destination::{Destination, FileMode, StreamDestination};
use crate::fmt::{DEFAULT_FORMAT, Format, TemplateFormatter};
use crate::internal;
use crate::level::Level;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

/// Options for [`Context::configure_root`](crate::Context::configure_root).
#[derive(Default)]
pub struct BasicConfig {
    level: Option<Level>,
    format: Option<String>,
    timestamp_format: Option<String>,
    destinations: Option<Vec<Arc<dyn Destination>>>,
    filename: Option<PathBuf>,
    mode: Option<FileMode>,
    stream: Option<Box<dyn Write + Send>>,
    force: bool,
}

impl BasicConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn level(mut self, level: Level) -> Self {
        self.level = Some(level);
        self
    }

    /// Template for destinations that don't already have a formatter.
    #[must_use]
    pub fn format(mut self, template: impl Into<String>) -> Self {
        self.format = Some(template.into());
        self
    }

    #[must_use]
    pub fn timestamp_format(mut self, format: impl Into<String>) -> Self {
        self.timestamp_format = Some(format.into());
        self
    }

    /// Adds a ready-made destination. Excludes `filename` and `stream`.
    #[must_use]
    pub fn destination(mut self, destination: Arc<dyn Destination>) -> Self {
        self.destinations
            .get_or_insert_with(Vec::new)
            .push(destination);
        self
    }

    /// Replaces the destination list. Excludes `filename` and `stream`.
    #[must_use]
    pub fn destinations(mut self, destinations: Vec<Arc<dyn Destination>>) -> Self {
        self.destinations = Some(destinations);
        self
    }

    /// Log to a file. Excludes `stream` and explicit destinations.
    #[must_use]
    pub fn filename(mut self, path: impl Into<PathBuf>) -> Self {
        self.filename = Some(path.into());
        self
    }

    /// Only meaningful together with [`filename`](Self::filename).
    #[must_use]
    pub const fn mode(mut self, mode: FileMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Log to any writer. Excludes `filename` and explicit destinations.
    #[must_use]
    pub fn stream(mut self, stream: impl Write + Send + 'static) -> Self {
        self.stream = Some(Box::new(stream));
        self
    }

    /// Remove and close the root's current destinations first.
    #[must_use]
    pub const fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// # Errors
    /// [`Error::ConflictingConfig`](crate::Error::ConflictingConfig) for combined targets.
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.filename.is_some() && self.stream.is_some() {
            return Err(crate::Error::ConflictingConfig(
                "'stream' and 'filename' should not be specified together".to_string(),
            ));
        }
        if self.destinations.is_some() && (self.filename.is_some() || self.stream.is_some()) {
            return Err(crate::Error::ConflictingConfig(
                "'stream' or 'filename' should not be specified together with 'destinations'"
                    .to_string(),
            ));
        }
        Ok(())
    }

    /// A root that already has destinations is left alone unless `force` is set.
    pub(crate) fn apply(self, root: &Logger) -> Result<(), crate::Error> {
        self.validate()?;

        if self.force {
            for destination in root.destinations() {
                root.remove_destination(&destination);
                destination.close();
            }
        }
        if !root.destinations().is_empty() {
            internal::debug("config", "Root already has destinations, skipping setup");
            return Ok(());
        }

        let destinations: Vec<Arc<dyn Destination>> = if let Some(list) = self.destinations {
            list
        } else if let Some(path) = self.filename {
            let mode = self.mode.unwrap_or_default();
            internal::debug("config", &format!("Root logs to {}", path.display()));
            vec![Arc::new(StreamDestination::file(&path, mode)?) as Arc<dyn Destination>]
        } else if let Some(stream) = self.stream {
            vec![Arc::new(StreamDestination::new(stream)) as Arc<dyn Destination>]
        } else {
            vec![Arc::new(StreamDestination::stderr()) as Arc<dyn Destination>]
        };

        let template = self.format.as_deref().unwrap_or(DEFAULT_FORMAT);
        let mut formatter = TemplateFormatter::new(template);
        if let Some(timestamp_format) = self.timestamp_format {
            formatter = formatter.timestamp_format(timestamp_format);
        }
        let formatter: Arc<dyn Format> = Arc::new(formatter);

        for destination in destinations {
            if destination.core().formatter().is_none() {
                destination.set_formatter(Arc::clone(&formatter));
            }
            root.add_destination(destination);
        }

        if let Some(level) = self.level {
            root.set_level(level);
        }
        Ok(())
    }
}
