//! reqwest-backed [`Transport`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::error::RestError;
use crate::transport::{HttpMethod, HttpRequest, Transport, TransportResponse};

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP transport built on a `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct RestClient {
    client: Client,
}

impl RestClient {
    /// Create a new REST client.
    ///
    /// # Arguments
    /// * `timeout` - Request timeout duration
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(timeout: Duration) -> Result<Self, RestError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RestError::RequestBuild(e.to_string()))?;

        Ok(Self { client })
    }

    /// Create a new REST client with default timeout.
    pub fn with_default_timeout() -> Result<Self, RestError> {
        Self::new(DEFAULT_TIMEOUT)
    }
}

#[async_trait]
impl Transport for RestClient {
    async fn execute(&self, request: HttpRequest) -> Result<TransportResponse, RestError> {
        tracing::debug!(method = %request.method, url = %request.url, "Sending request");

        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
        };

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        if let Some(form) = &request.form {
            builder = builder.form(form);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        tracing::debug!(status = status, bytes = body.len(), "Response received");

        Ok(TransportResponse { status, body })
    }
}
