//! Submission error taxonomy.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that end a submission before the result region is written.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// Request rejected or connection lost (includes timeouts).
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// Server answered with a non-2xx status.
    #[error("{endpoint} returned status {status}")]
    Status { endpoint: String, status: u16 },

    /// Response body could not be read.
    #[error("failed to read response body: {0}")]
    Body(#[source] reqwest::Error),

    /// Response body is not valid JSON.
    #[error("response is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// Form payload could not be encoded as multipart.
    #[error("failed to encode form payload: {0}")]
    Encode(#[source] reqwest::Error),

    /// A file input could not be read from disk.
    #[error("failed to read file input {path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Capability declared but never specified.
    #[error("{0} is not implemented")]
    NotImplemented(&'static str),
}

impl SubmitError {
    /// Short label used in logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            SubmitError::Transport { .. } => "transport",
            SubmitError::Status { .. } => "status",
            SubmitError::Body(_) => "body",
            SubmitError::Parse(_) => "parse",
            SubmitError::Encode(_) => "encode",
            SubmitError::File { .. } => "file",
            SubmitError::NotImplemented(_) => "not_implemented",
        }
    }
}

/// Result type for submissions.
pub type SubmitResult<T> = Result<T, SubmitError>;
