//! Error types for octogen-schema.

use std::path::PathBuf;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that stop a schema from being read at all.
///
/// Problems inside individual paths are not errors; they are reported as
/// [`crate::Warning`]s and the fragment is skipped.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Schema file could not be read.
    #[error("failed to read schema {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Schema is not valid JSON.
    #[error("invalid schema json: {0}")]
    Json(#[from] serde_json::Error),

    /// The document has no top-level `paths` object.
    #[error("schema has no `paths` object")]
    MissingPaths,
}
