//! REST client error types.

use thiserror::Error;

/// Errors raised by a transport before a complete HTTP response was received.
///
/// A response with a non-success status is not an error at this layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RestError {
    /// Request timed out.
    #[error("Request timeout")]
    Timeout,

    /// Connection error (network issue, DNS failure, refused connection).
    #[error("Connection error: {0}")]
    Connection(String),

    /// Failed to read the response body.
    #[error("Response body error: {0}")]
    Body(String),

    /// Failed to build the HTTP request.
    #[error("Request build error: {0}")]
    RequestBuild(String),

    /// Any other failure reported by the HTTP stack.
    #[error("Request error: {0}")]
    Request(String),
}

impl RestError {
    /// Check if this error is a timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, RestError::Timeout)
    }
}

impl From<reqwest::Error> for RestError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RestError::Timeout
        } else if err.is_connect() {
            RestError::Connection(err.to_string())
        } else if err.is_builder() {
            RestError::RequestBuild(err.to_string())
        } else if err.is_body() || err.is_decode() {
            RestError::Body(err.to_string())
        } else {
            RestError::Request(err.to_string())
        }
    }
}
