//! Shared configuration and helpers for the Liverate client crates.

mod config;
mod time;

pub use config::{
    ClientConfig, ConfigError, API_ROOT_ENV, DEFAULT_API_ROOT, DEFAULT_TIMEOUT, TIMEOUT_ENV,
};
pub use time::timestamp_ms;
