//! Schema document loading and `$ref` resolution.

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::{Error, Result};

/// Longest `$ref` chain followed before giving up.
const MAX_REF_HOPS: usize = 32;

/// A parsed OpenAPI document.
///
/// The whole JSON tree is kept so that local `$ref` pointers can be
/// resolved while paths are processed.
#[derive(Debug, Clone)]
pub struct SchemaDocument {
    root: Value,
}

/// One entry of the top-level `paths` object.
#[derive(Debug, Clone, Copy)]
pub struct PathEntry<'a> {
    /// The path template key.
    pub path: &'a str,

    /// The path item object.
    pub value: &'a Value,
}

impl SchemaDocument {
    /// Parse a schema from JSON text.
    ///
    /// # Errors
    /// Returns error if the text is not valid JSON.
    pub fn parse(json: &str) -> Result<Self> {
        let root = serde_json::from_str(json)?;
        Ok(Self { root })
    }

    /// Read and parse a schema file.
    ///
    /// # Errors
    /// Returns error if the file can't be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Wrap an already parsed JSON value.
    #[must_use]
    pub const fn from_value(root: Value) -> Self {
        Self { root }
    }

    /// List the entries of the `paths` object in document order.
    ///
    /// # Errors
    /// Returns [`Error::MissingPaths`] if there is no `paths` object.
    pub fn paths(&self) -> Result<Vec<PathEntry<'_>>> {
        let paths = self
            .root
            .get("paths")
            .and_then(Value::as_object)
            .ok_or(Error::MissingPaths)?;

        Ok(paths
            .iter()
            .map(|(path, value)| PathEntry { path, value })
            .collect())
    }

    /// Follow `$ref` pointers until a concrete value is reached.
    ///
    /// Values without a `$ref` are returned as-is. On failure the offending
    /// pointer is returned so callers can report it.
    pub fn resolve<'a>(&'a self, value: &'a Value) -> std::result::Result<&'a Value, String> {
        let mut current = value;
        for _ in 0..MAX_REF_HOPS {
            let Some(reference) = current.get("$ref").and_then(Value::as_str) else {
                return Ok(current);
            };
            current = self.lookup(reference).ok_or_else(|| reference.to_string())?;
        }
        Err(current
            .get("$ref")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string())
    }

    /// Look up a local `#/...` JSON pointer.
    fn lookup(&self, reference: &str) -> Option<&Value> {
        let pointer = reference.strip_prefix('#')?;
        // serde_json decodes ~0 and ~1 escapes itself
        self.root.pointer(pointer)
    }
}
