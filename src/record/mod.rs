//! The immutable snapshot built once per logging call and handed down the hierarchy.

mod factory;

pub use factory::{DefaultRecordFactory, RecordFactory, RecordParts};

use crate::level::Level;
use serde_json::Value;
use std::collections::BTreeMap;

/// Attribute names an `extra` map may not shadow.
pub const RESERVED_ATTRIBUTES: &[&str] = &[
    "level",
    "levelno",
    "level_name",
    "scope",
    "created",
    "msg",
    "args",
    "extra",
    "exc_info",
    "stack_info",
    "thread",
    "process",
    "message",
    "asctime",
];

/// Optional per-call data: positional args, extra attributes, and error context.
#[derive(Debug, Clone, Default)]
pub struct LogOptions {
    pub(crate) args: Vec<Value>,
    pub(crate) extra: BTreeMap<String, Value>,
    pub(crate) exc_info: Option<String>,
    pub(crate) stack_info: Option<String>,
}

impl LogOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fills the next `{}` slot of the message template.
    #[must_use]
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.args.push(value.into());
        self
    }

    #[must_use]
    pub fn args<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.args.extend(values.into_iter().map(Into::into));
        self
    }

    /// Keys are checked against [`RESERVED_ATTRIBUTES`] when the record is built.
    #[must_use]
    pub fn extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Rendered error chain or exception text attached to the record.
    #[must_use]
    pub fn exc_info(mut self, info: impl Into<String>) -> Self {
        self.exc_info = Some(info.into());
        self
    }

    #[must_use]
    pub fn stack_info(mut self, info: impl Into<String>) -> Self {
        self.stack_info = Some(info.into());
        self
    }
}

/// One logging event. Filters that want to change it build a modified copy.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    level: Level,
    level_name: String,
    scope: String,
    created_ms: i64,
    msg: String,
    args: Vec<Value>,
    extra: BTreeMap<String, Value>,
    exc_info: Option<String>,
    stack_info: Option<String>,
    thread: String,
    process: u32,
}

impl Record {
    /// Stamps the creation time and emitting thread.
    ///
    /// # Errors
    /// [`Error::AttributeCollision`](crate::Error::AttributeCollision) when an `extra`
    /// key matches a built-in attribute.
    pub fn new(parts: RecordParts) -> Result<Self, crate::Error> {
        let RecordParts {
            level,
            level_name,
            scope,
            msg,
            options,
        } = parts;

        if let Some(key) = options
            .extra
            .keys()
            .find(|key| RESERVED_ATTRIBUTES.contains(&key.as_str()))
        {
            return Err(crate::Error::AttributeCollision(key.clone()));
        }

        let current = std::thread::current();
        let thread = current
            .name()
            .map_or_else(|| format!("{:?}", current.id()), ToString::to_string);

        Ok(Self {
            level,
            level_name,
            scope,
            created_ms: chrono::Utc::now().timestamp_millis(),
            msg,
            args: options.args,
            extra: options.extra,
            exc_info: options.exc_info,
            stack_info: options.stack_info,
            thread,
            process: std::process::id(),
        })
    }

    #[must_use]
    pub const fn level(&self) -> Level {
        self.level
    }

    #[must_use]
    pub fn level_name(&self) -> &str {
        &self.level_name
    }

    /// Dot-path of the logger that created the record; empty for the root.
    #[must_use]
    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// Milliseconds since the Unix epoch.
    #[must_use]
    pub const fn created_ms(&self) -> i64 {
        self.created_ms
    }

    /// The unformatted template.
    #[must_use]
    pub fn msg(&self) -> &str {
        &self.msg
    }

    #[must_use]
    pub fn args(&self) -> &[Value] {
        &self.args
    }

    #[must_use]
    pub const fn extra(&self) -> &BTreeMap<String, Value> {
        &self.extra
    }

    #[must_use]
    pub fn exc_info(&self) -> Option<&str> {
        self.exc_info.as_deref()
    }

    #[must_use]
    pub fn stack_info(&self) -> Option<&str> {
        self.stack_info.as_deref()
    }

    #[must_use]
    pub fn thread(&self) -> &str {
        &self.thread
    }

    #[must_use]
    pub const fn process(&self) -> u32 {
        self.process
    }

    /// The template with each `{}` replaced by the next positional arg. Slots without an
    /// arg are left as-is, surplus args are ignored.
    #[must_use]
    pub fn message(&self) -> String {
        if self.args.is_empty() {
            return self.msg.clone();
        }

        let mut out = String::with_capacity(self.msg.len());
        let mut args = self.args.iter();
        let mut rest = self.msg.as_str();

        while let Some(pos) = rest.find("{}") {
            let Some(arg) = args.next() else {
                break;
            };
            out.push_str(&rest[..pos]);
            match arg {
                Value::String(s) => out.push_str(s),
                other => out.push_str(&other.to_string()),
            }
            rest = &rest[pos + 2..];
        }
        out.push_str(rest);
        out
    }

    /// Copy with a different template and no args, for filters that rewrite messages.
    #[must_use]
    pub fn with_message(&self, msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            args: Vec::new(),
            ..self.clone()
        }
    }

    /// Copy with one more extra attribute.
    ///
    /// # Errors
    /// [`Error::AttributeCollision`](crate::Error::AttributeCollision) for reserved keys.
    pub fn with_extra(
        &self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<Self, crate::Error> {
        let key = key.into();
        if RESERVED_ATTRIBUTES.contains(&key.as_str()) {
            return Err(crate::Error::AttributeCollision(key));
        }
        let mut copy = self.clone();
        copy.extra.insert(key, value.into());
        Ok(copy)
    }
}
