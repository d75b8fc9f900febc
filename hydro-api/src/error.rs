/// Error types for the station API client
use thiserror::Error;

/// Coarse classification of a failed read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Network,
    MalformedResponse,
}

/// A failed read against the station API
#[derive(Error, Debug)]
pub enum FetchError {
    /// The request failed before a usable body existed (transport error or
    /// non-success HTTP status)
    #[error("request to {url} failed: {message}")]
    Network { url: String, message: String },

    /// The body did not decode to the expected shape
    #[error("malformed response from {url}: {source}")]
    MalformedResponse {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    pub fn kind(&self) -> FailureKind {
        match self {
            FetchError::Network { .. } => FailureKind::Network,
            FetchError::MalformedResponse { .. } => FailureKind::MalformedResponse,
        }
    }

    pub fn url(&self) -> &str {
        match self {
            FetchError::Network { url, .. } | FetchError::MalformedResponse { url, .. } => url,
        }
    }
}

/// Type alias for Results using FetchError
pub type Result<T> = std::result::Result<T, FetchError>;
