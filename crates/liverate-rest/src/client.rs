//! Liverate REST API client.

use std::collections::BTreeMap;

use auth::{encode_component, ApiCredentials, RequestSigner};
use common::{timestamp_ms, ClientConfig};
use rest_client::{HttpMethod, HttpRequest, RestClient, Transport};
use serde_json::Value;

use crate::endpoint::Endpoint;
use crate::error::LiverateError;
use crate::response::parse_response;

/// Header carrying the API key.
pub const API_HEADER: &str = "API";

/// Header carrying the request timestamp in epoch milliseconds.
pub const TIMESTAMP_HEADER: &str = "TIMESTAMP";

/// Header carrying the base64 request signature.
pub const SIGNATURE_HEADER: &str = "SIGNATURE";

/// Liverate API client with request signing.
///
/// The client only holds immutable state, so one instance can serve any number
/// of concurrent calls. Everything that varies per request (timestamp, URL,
/// signature) lives inside [`LiverateClient::dispatch`].
pub struct LiverateClient<T = RestClient> {
    transport: T,
    credentials: ApiCredentials,
    config: ClientConfig,
}

impl LiverateClient<RestClient> {
    /// Create a client for the public API root.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(credentials: ApiCredentials) -> Result<Self, LiverateError> {
        Self::with_config(credentials, ClientConfig::default())
    }

    /// Create a client with an explicit configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_config(
        credentials: ApiCredentials,
        config: ClientConfig,
    ) -> Result<Self, LiverateError> {
        let transport = RestClient::new(config.timeout())?;
        Ok(Self::with_transport(credentials, config, transport))
    }

    /// Create a client from `LIVERATE_*` environment variables.
    ///
    /// # Errors
    /// Returns an error if credentials are missing or configuration is invalid.
    pub fn from_env() -> Result<Self, LiverateError> {
        let credentials = ApiCredentials::from_env()?;
        let config = ClientConfig::from_env()?;

        tracing::info!(
            api_key = %credentials.api_key(),
            config = %config,
            "Liverate client configured"
        );

        Self::with_config(credentials, config)
    }
}

impl<T: Transport> LiverateClient<T> {
    /// Create a client on top of any transport.
    pub fn with_transport(credentials: ApiCredentials, config: ClientConfig, transport: T) -> Self {
        Self {
            transport,
            credentials,
            config,
        }
    }

    /// Get the API key (for logging/debugging).
    pub fn api_key(&self) -> &str {
        self.credentials.api_key()
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Save the rating of an object.
    ///
    /// POST rate/save
    pub async fn save_rating(&self, params: &[(&str, &str)]) -> Result<Value, LiverateError> {
        self.dispatch(Endpoint::SaveRating, params).await
    }

    /// Get the ratings of an object.
    ///
    /// GET rate/get
    pub async fn get_rating(&self, params: &[(&str, &str)]) -> Result<Value, LiverateError> {
        self.dispatch(Endpoint::GetRating, params).await
    }

    /// Save feedback on an object.
    ///
    /// POST feedback/save
    pub async fn save_feedback(&self, params: &[(&str, &str)]) -> Result<Value, LiverateError> {
        self.dispatch(Endpoint::SaveFeedback, params).await
    }

    /// Get the feedbacks of an object.
    ///
    /// GET feedback/get
    pub async fn get_feedbacks(&self, params: &[(&str, &str)]) -> Result<Value, LiverateError> {
        self.dispatch(Endpoint::GetFeedbacks, params).await
    }

    /// List objects.
    ///
    /// GET object/list
    pub async fn list_objects(&self, params: &[(&str, &str)]) -> Result<Value, LiverateError> {
        self.dispatch(Endpoint::ListObjects, params).await
    }

    /// Sign and send a request to `endpoint`, then parse the response.
    ///
    /// The timestamp is read once here and threaded through signing and the
    /// headers.
    pub async fn dispatch(
        &self,
        endpoint: Endpoint,
        params: &[(&str, &str)],
    ) -> Result<Value, LiverateError> {
        let timestamp = timestamp_ms();
        let request = self.build_request(endpoint, params, timestamp);

        tracing::debug!(
            endpoint = %endpoint,
            timestamp = timestamp,
            param_count = params.len(),
            "Dispatching Liverate request"
        );

        let outcome = self.transport.execute(request).await;
        parse_response(outcome)
    }

    /// Build the signed HTTP request for `endpoint` at `timestamp_ms`.
    ///
    /// GET parameters go in the query string (and the signed URL). POST sends
    /// the signed parameter set, auth fields included, as a form body with the
    /// values decoded back from their signing encoding.
    pub fn build_request(
        &self,
        endpoint: Endpoint,
        params: &[(&str, &str)],
        timestamp_ms: i64,
    ) -> HttpRequest {
        let method = endpoint.method();
        let mut url = format!("{}{}", self.config.api_root(), endpoint.path());
        if method == HttpMethod::Get {
            url.push('?');
            url.push_str(&query_string(params));
        }

        let signer = RequestSigner::new(&self.credentials);
        let signed = signer.sign_request(method.as_str(), &url, params, timestamp_ms);
        let form = (method == HttpMethod::Post).then(|| signed.decoded());

        let mut request = HttpRequest::new(method, url)
            .with_header(API_HEADER, self.credentials.api_key())
            .with_header(TIMESTAMP_HEADER, timestamp_ms.to_string())
            .with_header(SIGNATURE_HEADER, signed.signature);

        if let Some(form) = form {
            request = request.with_form(form);
        }

        request
    }
}

impl<T> std::fmt::Debug for LiverateClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiverateClient")
            .field("api_root", &self.config.api_root())
            .field("timeout", &self.config.timeout())
            .field("credentials", &self.credentials)
            .finish()
    }
}

/// Build a query string with keys and values component-encoded, sorted by key.
/// Later duplicates win.
fn query_string(params: &[(&str, &str)]) -> String {
    let merged: BTreeMap<&str, &str> = params.iter().copied().collect();

    merged
        .into_iter()
        .map(|(k, v)| format!("{}={}", encode_component(k), encode_component(v)))
        .collect::<Vec<_>>()
        .join("&")
}
