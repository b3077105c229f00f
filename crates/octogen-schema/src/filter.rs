//! Path prefix allow-list used to scope a generation run.

use crate::reader::PathEntry;

/// Allow-list of path prefixes.
///
/// An empty list allows every path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathFilter {
    prefixes: Vec<String>,
}

impl PathFilter {
    /// Create a filter from a list of prefixes.
    #[must_use]
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }

    /// Check whether a path is in scope.
    #[must_use]
    pub fn allows(&self, path: &str) -> bool {
        self.prefixes.is_empty() || self.prefixes.iter().any(|p| path.starts_with(p.as_str()))
    }

    /// Keep only the allowed entries, preserving order.
    #[must_use]
    pub fn apply<'a>(&self, entries: Vec<PathEntry<'a>>) -> Vec<PathEntry<'a>> {
        entries.into_iter().filter(|e| self.allows(e.path)).collect()
    }
}
