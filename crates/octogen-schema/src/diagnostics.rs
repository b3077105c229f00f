//! Warnings collected while processing a schema.
//!
//! Schema fragments the generator cannot use are skipped and recorded here,
//! so one bad parameter never aborts a whole run.

use std::fmt;

/// Why a schema fragment was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WarningKind {
    /// Path item key is not a verb the processor handles.
    UnsupportedVerb(String),

    /// Verb value is not a JSON object.
    MalformedVerb(String),

    /// Parameter lacks `name` or `in`.
    ParameterMissingField(&'static str),

    /// Parameter `in` is not path, query, header or cookie.
    UnknownParameterLocation(String),

    /// Parameter has no `schema.type`.
    ParameterWithoutType(String),

    /// Property has no `type`.
    PropertyWithoutType(String),

    /// `$ref` pointer could not be followed.
    UnresolvedRef(String),

    /// Object nesting exceeded the recursion limit.
    NestingTooDeep(String),
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedVerb(verb) => write!(f, "unsupported verb '{verb}' skipped"),
            Self::MalformedVerb(verb) => write!(f, "verb '{verb}' is not an object"),
            Self::ParameterMissingField(field) => {
                write!(f, "parameter without '{field}' dropped")
            }
            Self::UnknownParameterLocation(location) => {
                write!(f, "parameter location '{location}' not recognised")
            }
            Self::ParameterWithoutType(name) => {
                write!(f, "parameter '{name}' has no schema type")
            }
            Self::PropertyWithoutType(name) => write!(f, "property '{name}' has no type"),
            Self::UnresolvedRef(pointer) => write!(f, "unresolved reference '{pointer}'"),
            Self::NestingTooDeep(name) => {
                write!(f, "property '{name}' nested too deeply, dropped")
            }
        }
    }
}

/// A single skipped fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    /// Path template the fragment belongs to.
    pub path: String,

    /// Where inside the path item, e.g. `get` or `get responses 200`.
    pub context: String,

    pub kind: WarningKind,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.context.is_empty() {
            write!(f, "{}: {}", self.path, self.kind)
        } else {
            write!(f, "{} ({}): {}", self.path, self.context, self.kind)
        }
    }
}

/// Collector for warnings raised during a run.
#[derive(Debug, Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    /// Create an empty collector.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            warnings: Vec::new(),
        }
    }

    /// Record a warning.
    pub fn warn(&mut self, path: &str, context: impl Into<String>, kind: WarningKind) {
        self.warnings.push(Warning {
            path: path.to_string(),
            context: context.into(),
            kind,
        });
    }

    /// Warnings recorded so far, in the order they were raised.
    #[must_use]
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Check if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Consume the collector and return its warnings.
    #[must_use]
    pub fn into_warnings(self) -> Vec<Warning> {
        self.warnings
    }
}
