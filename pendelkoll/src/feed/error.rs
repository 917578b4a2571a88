//! Feed error types.

use std::path::PathBuf;

/// Errors from decoding an announcement payload.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// Reading the snapshot file failed
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The payload was not valid feed JSON
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The feed reported an error instead of results
    #[error("feed error ({origin}): {message}")]
    Api { origin: String, message: String },
}

/// Error converting a single announcement to the domain model.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    /// Missing required field
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// A timestamp could not be parsed
    #[error("invalid {field}: {value:?}")]
    InvalidTime { field: &'static str, value: String },
}
