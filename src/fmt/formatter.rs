//! The formatter hook destinations call to turn a record into a line.

use super::format::{Field, FormatTemplate, FormatValues};
use crate::record::Record;
use chrono::{Local, TimeZone};

/// Renders a record for a destination.
pub trait Format: Send + Sync {
    fn format(&self, record: &Record) -> String;
}

impl<F> Format for F
where
    F: Fn(&Record) -> String + Send + Sync,
{
    fn format(&self, record: &Record) -> String {
        self(record)
    }
}

/// Template-driven formatter with a strftime timestamp.
#[derive(Debug, Clone)]
pub struct TemplateFormatter {
    template: FormatTemplate,
    timestamp_format: String,
}

impl Default for TemplateFormatter {
    fn default() -> Self {
        Self::new(super::DEFAULT_FORMAT)
    }
}

impl TemplateFormatter {
    #[must_use]
    pub fn new(template: &str) -> Self {
        Self {
            template: FormatTemplate::parse(template),
            timestamp_format: super::DEFAULT_TIMESTAMP_FORMAT.to_string(),
        }
    }

    #[must_use]
    pub fn timestamp_format(mut self, format: impl Into<String>) -> Self {
        self.timestamp_format = format.into();
        self
    }

    fn timestamp(&self, record: &Record) -> String {
        Local
            .timestamp_millis_opt(record.created_ms())
            .single()
            .map(|t| t.format(&self.timestamp_format).to_string())
            .unwrap_or_default()
    }
}

impl Format for TemplateFormatter {
    fn format(&self, record: &Record) -> String {
        let timestamp = if self.template.uses(Field::Timestamp) {
            self.timestamp(record)
        } else {
            String::new()
        };

        let values = FormatValues {
            level: record.level_name().to_string(),
            levelno: record.level().value().to_string(),
            scope: record.scope().to_string(),
            msg: record.message(),
            timestamp,
            created: record.created_ms().to_string(),
            thread: record.thread().to_string(),
            process: record.process().to_string(),
            exc: record.exc_info().unwrap_or_default().to_string(),
        };

        let mut line = self.template.render(&values);
        if !self.template.uses(Field::Exc)
            && let Some(exc) = record.exc_info()
        {
            line.push('\n');
            line.push_str(exc);
        }
        if let Some(stack) = record.stack_info() {
            line.push('\n');
            line.push_str(stack);
        }
        line
    }
}
