//! Liverate rating and feedback API client.
//!
//! This crate provides a signed client for the five Liverate endpoints:
//!
//! - **Ratings**: save and fetch the rating of an object
//! - **Feedback**: save and fetch written feedback
//! - **Objects**: list rated objects
//!
//! Every request carries `API`, `TIMESTAMP` and `SIGNATURE` headers computed by
//! the `auth` crate. Responses are returned as `serde_json::Value`; any status
//! other than 200, an unparseable body, or a transport failure is an error.
//!
//! # Example
//!
//! ```rust,ignore
//! use auth::ApiCredentials;
//! use liverate_rest::LiverateClient;
//!
//! let client = LiverateClient::new(ApiCredentials::new("my-key", "my-secret"))?;
//!
//! client.save_rating(&[("objectId", "42"), ("rating", "5")]).await?;
//! let rating = client.get_rating(&[("objectId", "42")]).await?;
//! println!("{}", rating["rating"]);
//! ```

mod client;
mod endpoint;
mod error;
mod response;

pub use client::{LiverateClient, API_HEADER, SIGNATURE_HEADER, TIMESTAMP_HEADER};
pub use endpoint::Endpoint;
pub use error::LiverateError;
pub use response::parse_response;
