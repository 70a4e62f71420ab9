//! Error types for nile-client.

use thiserror::Error;

/// Errors that can occur when talking to the hosted query API.
#[derive(Debug, Error)]
pub enum NileError {
    /// Required configuration is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// The API answered with a non-success status.
    #[error("Nile API error: {status} {reason}")]
    Transport { status: u16, reason: String },

    /// HTTP request failed before a status was received.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response rows did not match the expected shape.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// A bound parameter could not be encoded as JSON.
    #[error("encode error: {0}")]
    Encode(String),

    /// A statement expected to return a row returned none.
    #[error("query returned no rows")]
    RowMissing,
}

impl NileError {
    /// HTTP status code for transport failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            NileError::Transport { status, .. } => Some(*status),
            NileError::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
