//! Liverate client configuration.
//!
//! Holds the API root and the HTTP timeout, with defaults matching the public
//! service and optional overrides from the environment.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// Public API root of the Liverate service.
pub const DEFAULT_API_ROOT: &str = "http://rate.kagogo.co/v1/";

/// Default HTTP request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Environment variable overriding the API root.
pub const API_ROOT_ENV: &str = "LIVERATE_API_ROOT";

/// Environment variable overriding the timeout, in whole seconds.
pub const TIMEOUT_ENV: &str = "LIVERATE_TIMEOUT_SECS";

/// Errors raised while reading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A variable was set but could not be parsed.
    #[error("invalid value '{value}' for {name}: {reason}")]
    InvalidValue {
        /// Variable name.
        name: String,
        /// Raw value.
        value: String,
        /// Why it was rejected.
        reason: String,
    },
}

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    api_root: String,
    timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_root: DEFAULT_API_ROOT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Create a configuration for the given API root.
    ///
    /// The root is normalized to end with exactly one `/` so endpoint paths
    /// can be appended directly.
    pub fn new(api_root: &str, timeout: Duration) -> Self {
        Self {
            api_root: normalize_root(api_root),
            timeout,
        }
    }

    /// Replace the API root.
    pub fn with_api_root(mut self, api_root: &str) -> Self {
        self.api_root = normalize_root(api_root);
        self
    }

    /// Replace the timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// API root, always ending in `/`.
    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    /// HTTP request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Load configuration from `LIVERATE_API_ROOT` and `LIVERATE_TIMEOUT_SECS`.
    ///
    /// Unset variables fall back to the defaults. A `.env` file is read first
    /// if present.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidValue` if the timeout is not a positive integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(root) = lookup(API_ROOT_ENV).filter(|r| !r.trim().is_empty()) {
            config = config.with_api_root(root.trim());
        }

        if let Some(raw) = lookup(TIMEOUT_ENV) {
            let secs: u64 = raw.trim().parse().map_err(|e: std::num::ParseIntError| {
                ConfigError::InvalidValue {
                    name: TIMEOUT_ENV.to_string(),
                    value: raw.clone(),
                    reason: e.to_string(),
                }
            })?;

            if secs == 0 {
                return Err(ConfigError::InvalidValue {
                    name: TIMEOUT_ENV.to_string(),
                    value: raw,
                    reason: "timeout must be positive".to_string(),
                });
            }

            config = config.with_timeout(Duration::from_secs(secs));
        }

        Ok(config)
    }
}

impl fmt::Display for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (timeout {}s)",
            self.api_root,
            self.timeout.as_secs()
        )
    }
}

fn normalize_root(root: &str) -> String {
    format!("{}/", root.trim_end_matches('/'))
}
