//! Record rendering. Destinations only need the [`Format`] hook; the template
//! formatter covers the common `{level}:{scope}:{msg}` style lines.

mod format;
mod formatter;

pub use format::{Field, FormatSegment, FormatTemplate, FormatValues};
pub use formatter::{Format, TemplateFormatter};

/// Line layout used when nothing else was configured.
pub const DEFAULT_FORMAT: &str = "{level}:{scope}:{msg}";

pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
