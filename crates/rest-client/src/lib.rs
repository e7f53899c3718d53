//! HTTP transport for the Liverate client.
//!
//! This crate provides:
//!
//! - The [`Transport`] trait: send one request, get the status and body back
//! - [`RestClient`], a thin `reqwest` implementation with a request timeout
//! - Consistent error classification via [`RestError`]
//!
//! Non-success status codes are returned as ordinary responses; interpreting
//! them is left to the caller.
//!
//! # Example
//!
//! ```rust,ignore
//! use rest_client::{HttpMethod, HttpRequest, RestClient, Transport};
//!
//! let client = RestClient::with_default_timeout()?;
//! let request = HttpRequest::new(HttpMethod::Get, "http://rate.kagogo.co/v1/object/list")
//!     .with_header("API", "my-key");
//! let response = client.execute(request).await?;
//! println!("{} {}", response.status, response.body);
//! ```

mod client;
mod error;
mod transport;

pub use client::RestClient;
pub use error::RestError;
pub use transport::{HttpMethod, HttpRequest, Transport, TransportResponse};
