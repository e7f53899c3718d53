//! Authentication and signing for the Liverate API.
//!
//! This crate provides secure credential management and the HMAC-SHA1 request
//! signature the Liverate server verifies on every call.
//!
//! # Features
//!
//! - **Secure Credentials**: API secrets are wrapped in `SecretString` to prevent
//!   accidental logging and ensure memory is zeroed on drop.
//! - **HMAC-SHA1 Signing**: Canonicalizes parameters and signs them with a
//!   per-request key derived from the API key, timestamp and secret.
//! - **Environment Loading**: Credentials can be loaded from environment variables
//!   or a `.env` file.
//!
//! # Example
//!
//! ```rust,ignore
//! use auth::{ApiCredentials, RequestSigner};
//!
//! let credentials = ApiCredentials::from_env()?;
//! let signer = RequestSigner::new(&credentials);
//!
//! let params = [("objectId", "42")];
//! let signed = signer.sign_request("GET", url, &params, timestamp_ms);
//! ```

mod credentials;
mod error;
mod signer;

pub use credentials::{ApiCredentials, API_KEY_ENV, API_SECRET_ENV};
pub use error::AuthError;
pub use signer::{
    build_signature, canonical_parameters, decode_component, encode_component, hmac_sha1_base64,
    serialize_parameters, signature_base_string, signature_token, RequestSigner, SignedParameters,
    AUTH_API, AUTH_TIMESTAMP,
};
