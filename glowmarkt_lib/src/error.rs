//! Error types for the Glowmarkt API client.

use thiserror::Error;

/// Base error type for Glowmarkt operations.
///
/// A rejected login is not an error: [`crate::House::authenticate`] reports it as `Ok(false)`.
#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Invalid response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("No readings returned for resource {resource_id}")]
    EmptySeries { resource_id: String },

    #[error("Timestamp out of range: {0}")]
    InvalidTimestamp(i64),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Invalid header value: {0}")]
    InvalidHeader(String),
}

/// Raised when the API answers with anything other than HTTP 200.
#[derive(Error, Debug)]
#[error("{message} (status {status_code})")]
pub struct ApiError {
    pub message: String,
    pub status_code: u16,
    pub response_data: Option<serde_json::Value>,
}

impl ApiError {
    pub fn new(
        message: impl Into<String>,
        status_code: u16,
        response_data: Option<serde_json::Value>,
    ) -> Self {
        Self {
            message: message.into(),
            status_code,
            response_data,
        }
    }
}

impl Error {
    /// HTTP status of a failed API request, if that is what this error is.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Api(e) => Some(e.status_code),
            _ => None,
        }
    }
}
