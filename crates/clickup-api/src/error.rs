//! Error types for the API client.

use thiserror::Error;

/// Result type alias for API client operations.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors raised while loading configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required environment variable is unset or empty.
    #[error("{0} environment variable is required")]
    MissingVar(&'static str),
}

/// Errors that can occur during a single API call, one variant per stage.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The base URL, path and query did not form a valid URL.
    #[error("invalid endpoint '{url}': {source}")]
    InvalidEndpoint {
        url: String,
        #[source]
        source: ureq::http::uri::InvalidUri,
    },

    /// The request body could not be serialized.
    #[error("encoding request: {0}")]
    Encode(#[source] serde_json::Error),

    /// DNS, connection, TLS or timeout failure.
    #[error("request failed: {0}")]
    Transport(#[source] ureq::Error),

    /// The response body could not be read.
    #[error("reading response: {0}")]
    Read(#[source] ureq::Error),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body was not valid JSON for the expected type.
    #[error("decoding response: {0}")]
    Decode(#[source] serde_json::Error),
}

impl ApiError {
    /// HTTP status code, when the server answered.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
