//! Store error types.

use thiserror::Error;

/// Errors that can occur when writing a result to a store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The local file could not be written.
    #[error("failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The record could not be serialized.
    #[error("failed to serialize result: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The endpoint answered with an error status.
    #[error("store rejected result (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// The endpoint could not be reached.
    #[error("store unreachable: {0}")]
    Unreachable(String),
}
