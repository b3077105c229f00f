//! Error types for octogen-core.

use std::path::PathBuf;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while generating a client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Path template has unbalanced or empty braces.
    #[error("malformed path template '{path}': {reason}")]
    MalformedTemplate { path: String, reason: String },

    /// URI placeholder has no matching required path parameter.
    #[error("placeholder '{{{placeholder}}}' in '{path}' has no matching path parameter")]
    MissingParameter { path: String, placeholder: String },

    /// Path has no literal segment to name a class after.
    #[error("path '{path}' has no literal segment to derive a class name from")]
    EmptyClassName { path: String },

    /// Two paths derived the same class name.
    #[error("class '{class_name}' for '{path}' already generated from '{first_path}'")]
    DuplicateClass {
        class_name: String,
        path: String,
        first_path: String,
    },

    /// Config file parsing error.
    #[error("failed to parse {file}: {message}")]
    Config { file: PathBuf, message: String },

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Schema error.
    #[error("schema error: {0}")]
    Schema(#[from] octogen_schema::Error),
}
