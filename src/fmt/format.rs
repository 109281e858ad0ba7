//! Brace templates such as `"{level}:{scope}:{msg}"`, parsed once and rendered per record.

/// Closed set of known substitution tokens. Unknown `{names}` pass through as literal text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Level,
    LevelNo,
    Scope,
    Msg,
    Timestamp,
    Created,
    Thread,
    Process,
    Exc,
}

impl Field {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Level => "level",
            Self::LevelNo => "levelno",
            Self::Scope => "scope",
            Self::Msg => "msg",
            Self::Timestamp => "timestamp",
            Self::Created => "created",
            Self::Thread => "thread",
            Self::Process => "process",
            Self::Exc => "exc",
        }
    }

    pub const ALL: &'static [Self] = &[
        Self::Level,
        Self::LevelNo,
        Self::Scope,
        Self::Msg,
        Self::Timestamp,
        Self::Created,
        Self::Thread,
        Self::Process,
        Self::Exc,
    ];

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.as_str() == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatSegment {
    Literal(String),
    Field(Field),
}

/// Pre-parsed template, rendered once per record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatTemplate {
    segments: Vec<FormatSegment>,
}

impl FormatTemplate {
    #[must_use]
    pub fn parse(template: &str) -> Self {
        let mut segments = Vec::new();
        let mut current = String::new();
        let mut rest = template;

        while let Some(open) = rest.find('{') {
            let Some(close) = rest[open..].find('}').map(|c| open + c) else {
                break;
            };
            // The placeholder starts at the brace nearest to `close`.
            let open = rest[..close].rfind('{').unwrap_or(open);
            current.push_str(&rest[..open]);
            let name = &rest[open + 1..close];

            if let Some(field) = Field::from_name(name) {
                if !current.is_empty() {
                    segments.push(FormatSegment::Literal(std::mem::take(&mut current)));
                }
                segments.push(FormatSegment::Field(field));
            } else {
                current.push_str(&rest[open..=close]);
            }
            rest = &rest[close + 1..];
        }

        current.push_str(rest);
        if !current.is_empty() {
            segments.push(FormatSegment::Literal(current));
        }

        Self { segments }
    }

    #[must_use]
    pub fn segments(&self) -> &[FormatSegment] {
        &self.segments
    }

    /// Whether the template contains `field`.
    #[must_use]
    pub fn uses(&self, field: Field) -> bool {
        self.segments
            .iter()
            .any(|s| matches!(s, FormatSegment::Field(f) if *f == field))
    }

    #[must_use]
    pub fn render(&self, values: &FormatValues) -> String {
        let mut result = String::new();

        for segment in &self.segments {
            match segment {
                FormatSegment::Literal(s) => result.push_str(s),
                FormatSegment::Field(field) => {
                    let value = match field {
                        Field::Level => &values.level,
                        Field::LevelNo => &values.levelno,
                        Field::Scope => &values.scope,
                        Field::Msg => &values.msg,
                        Field::Timestamp => &values.timestamp,
                        Field::Created => &values.created,
                        Field::Thread => &values.thread,
                        Field::Process => &values.process,
                        Field::Exc => &values.exc,
                    };
                    result.push_str(value);
                }
            }
        }

        result
    }
}

impl Default for FormatTemplate {
    fn default() -> Self {
        Self::parse(super::DEFAULT_FORMAT)
    }
}

/// One string per [`Field`], filled by the formatter before rendering.
#[derive(Debug, Clone, Default)]
pub struct FormatValues {
    pub level: String,
    pub levelno: String,
    pub scope: String,
    pub msg: String,
    pub timestamp: String,
    pub created: String,
    pub thread: String,
    pub process: String,
    pub exc: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_fields_stay_literal() {
        let template = FormatTemplate::parse("{level} {nope} {msg}");
        assert_eq!(
            template.segments(),
            &[
                FormatSegment::Field(Field::Level),
                FormatSegment::Literal(" {nope} ".to_string()),
                FormatSegment::Field(Field::Msg),
            ]
        );
    }

    #[test]
    fn stray_open_brace_before_field() {
        let template = FormatTemplate::parse("{a {msg}");
        assert_eq!(
            template.segments(),
            &[
                FormatSegment::Literal("{a ".to_string()),
                FormatSegment::Field(Field::Msg),
            ]
        );

        let values = FormatValues {
            msg: "hi".to_string(),
            ..FormatValues::default()
        };
        assert_eq!(FormatTemplate::parse("x{{msg}}").render(&values), "x{hi}");
    }

    #[test]
    fn unclosed_brace_is_literal() {
        let values = FormatValues {
            msg: "hi".to_string(),
            ..FormatValues::default()
        };
        assert_eq!(FormatTemplate::parse("{msg} {oops").render(&values), "hi {oops");
    }
}
