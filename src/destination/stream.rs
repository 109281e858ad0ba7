//! Line-oriented writer sink. Covers the stderr last resort and the stream/file targets
//! `configure_root` builds; anything fancier is the embedder's own destination.

use super::{Destination, DestinationCore};
use crate::level::Level;
use crate::record::Record;
use crate::sync;
use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;
use std::str::FromStr;
use std::sync::Mutex;

/// How `configure_root` opens a log file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileMode {
    #[default]
    Append,
    Truncate,
}

impl FromStr for FileMode {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "a" | "append" => Ok(Self::Append),
            "w" | "write" | "truncate" => Ok(Self::Truncate),
            other => Err(crate::Error::InvalidConfig(format!(
                "unknown file mode '{other}'"
            ))),
        }
    }
}

/// Writes each formatted record followed by a newline.
pub struct StreamDestination {
    core: DestinationCore,
    stream: Mutex<Box<dyn Write + Send>>,
    label: String,
}

impl fmt::Debug for StreamDestination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamDestination")
            .field("label", &self.label)
            .field("core", &self.core)
            .finish_non_exhaustive()
    }
}

impl StreamDestination {
    #[must_use]
    pub fn new(stream: impl Write + Send + 'static) -> Self {
        Self::labelled(stream, "<stream>")
    }

    fn labelled(stream: impl Write + Send + 'static, label: &str) -> Self {
        Self {
            core: DestinationCore::new(Level::NOTSET),
            stream: Mutex::new(Box::new(stream)),
            label: label.to_string(),
        }
    }

    #[must_use]
    pub fn stderr() -> Self {
        Self::labelled(io::stderr(), "<stderr>")
    }

    #[must_use]
    pub fn stdout() -> Self {
        Self::labelled(io::stdout(), "<stdout>")
    }

    /// Opens (creating if needed) `path`; `~` is expanded.
    ///
    /// # Errors
    /// I/O errors from opening the file.
    pub fn file(path: impl AsRef<Path>, mode: FileMode) -> Result<Self, crate::Error> {
        let raw = path.as_ref().to_string_lossy();
        let expanded = shellexpand::tilde(&raw).into_owned();

        let mut options = OpenOptions::new();
        options.create(true);
        match mode {
            FileMode::Append => options.append(true),
            FileMode::Truncate => options.write(true).truncate(true),
        };
        let file = options.open(&expanded)?;
        Ok(Self::labelled(file, &expanded))
    }

    /// Builder-style threshold for construction sites.
    #[must_use]
    pub fn with_threshold(self, level: Level) -> Self {
        self.core.set_threshold(level);
        self
    }

    /// Where this destination writes, for diagnostics.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl Destination for StreamDestination {
    fn core(&self) -> &DestinationCore {
        &self.core
    }

    fn emit(&self, record: &Record) -> Result<(), crate::Error> {
        let line = self.core.format(record);
        let mut stream = sync::lock(&self.stream);
        writeln!(stream, "{line}")?;
        Ok(())
    }

    fn flush(&self) -> Result<(), crate::Error> {
        sync::lock(&self.stream).flush()?;
        Ok(())
    }

    fn close(&self) {
        let _ = self.flush();
        self.core.close();
    }
}
