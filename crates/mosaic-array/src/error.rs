//! Error types for the mosaic-array crate.

use thiserror::Error;

use crate::key::Key;

/// Errors that can occur when accessing, filtering or decoding a container.
#[derive(Debug, Error)]
pub enum MosaicError {
    /// Strict lookup of a key that is not in the array.
    #[error("key not found: {0}")]
    MissingKey(Key),

    /// A value of this type cannot be used as an array key.
    #[error("{0} values cannot be used as array keys")]
    InvalidKey(&'static str),

    /// Pattern is empty or starts with an alphanumeric or backslash delimiter.
    #[error("invalid pattern delimiter in {pattern:?}")]
    InvalidDelimiter { pattern: String },

    /// Pattern has no closing delimiter.
    #[error("no ending delimiter '{delimiter}' found in {pattern:?}")]
    MissingEndDelimiter { pattern: String, delimiter: char },

    /// Unsupported modifier after the closing delimiter.
    #[error("unknown pattern modifier '{0}'")]
    UnknownModifier(char),

    /// Invalid regular expression body.
    #[error("invalid regex pattern: {0}")]
    Regex(#[from] regex::Error),

    /// Format name not recognised by `Format::from_str`.
    #[error("unknown format: {0}")]
    UnknownFormat(String),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type for mosaic-array operations.
pub type Result<T> = std::result::Result<T, MosaicError>;
