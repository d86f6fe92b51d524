//! Source error types.

use thiserror::Error;

/// Errors that can occur while fetching a document.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The document does not exist at the source.
    #[error("document not found: {0}")]
    NotFound(String),

    /// The request timed out.
    #[error("request timed out after {0}ms")]
    Timeout(u64),

    /// The source could not be reached.
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with an error status.
    #[error("server error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// The document could not be decoded.
    #[error("malformed document {document}: {message}")]
    Malformed { document: String, message: String },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl SourceError {
    /// Whether retrying the same request can never help.
    pub fn is_permanent(&self) -> bool {
        matches!(self, SourceError::NotFound(_) | SourceError::Malformed { .. })
    }
}
