//! Error types for the gallery.
//!
//! Layout never fails; everything here comes from talking to the photo API or reading
//! configuration.

use thiserror::Error;

/// A failed page fetch. Never retried by the fetcher.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport failure: connection refused, DNS, timeout, broken body.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The API answered 2xx with a body that is not a photo page.
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The request was rejected before being sent.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl FetchError {
    /// HTTP status for API errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Api { status, .. } => Some(*status),
            FetchError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::Network(e) if e.is_timeout())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("PEXELS_API_KEY is not set")]
    MissingApiKey,

    #[error("invalid value for {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },
}
