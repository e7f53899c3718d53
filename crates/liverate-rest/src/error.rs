//! Liverate client error types.

use auth::AuthError;
use common::ConfigError;
use rest_client::RestError;
use thiserror::Error;

/// Errors returned by the Liverate client.
///
/// A request fails in exactly one of two ways: the transport never produced a
/// response (`Transport`), or the server answered with something other than a
/// 200 JSON document (`Server`). `Auth` and `Config` only occur while
/// constructing a client.
#[derive(Debug, Error)]
pub enum LiverateError {
    /// The HTTP call itself failed (network, DNS, timeout).
    #[error("Transport error: {0}")]
    Transport(#[from] RestError),

    /// The server responded with a non-200 status or an unparseable body.
    #[error("Server error {status}: {message}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Response body, or the parse failure for a 200 response.
        message: String,
    },

    /// Credentials could not be loaded.
    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl LiverateError {
    /// HTTP status of a `Server` error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Check if the request never reached a response.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
