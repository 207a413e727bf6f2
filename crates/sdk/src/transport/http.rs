//! HTTP transport layer for the LeadMagic SDK.

use crate::config::ClientConfig;
use crate::endpoint::Endpoint;
use crate::error::{ConfigError, LeadMagicError, LeadMagicResult};
use reqwest::{header, Client, Method, RequestBuilder};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// HTTP transport for making API requests.
///
/// Every call is a single request/response cycle. Nothing is retried.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    config: Arc<ClientConfig>,
}

impl HttpTransport {
    /// Create a new HTTP transport with the given configuration.
    pub fn new(config: Arc<ClientConfig>) -> Result<Self, ConfigError> {
        let mut headers = header::HeaderMap::new();

        let mut api_key = header::HeaderValue::from_str(&config.api_key)
            .map_err(|_| ConfigError::InvalidApiKey)?;
        api_key.set_sensitive(true);
        headers.insert(header::HeaderName::from_static(API_KEY_HEADER), api_key);
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .build()?;

        Ok(Self { client, config })
    }

    /// Build a URL for the given path.
    fn build_url(&self, path: &str) -> LeadMagicResult<url::Url> {
        self.config
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| LeadMagicError::unknown(format!("Invalid request path '{}': {}", path, e)))
    }

    /// Send a request and return the success body as raw JSON.
    ///
    /// A 2xx body that is not JSON is kept as a JSON string; an empty one is `null`.
    async fn send(
        &self,
        request: RequestBuilder,
        method: &Method,
        path: &str,
    ) -> LeadMagicResult<Value> {
        debug!(method = %method, path = path, "LeadMagic request");

        let response = request.send().await?;
        let status = response.status();
        debug!(method = %method, path = path, status = status.as_u16(), "LeadMagic response");

        let body = response.text().await?;
        if !status.is_success() {
            return Err(LeadMagicError::from_response(status, &body));
        }

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&body).unwrap_or_else(|e| {
            debug!(path = path, error = %e, "Success body is not JSON");
            Value::String(body)
        }))
    }

    /// Decode a raw success body into its typed view.
    fn decode<T: DeserializeOwned>(path: &str, body: Value) -> LeadMagicResult<T> {
        serde_json::from_value(body).map_err(|e| {
            LeadMagicError::unknown(format!("Malformed response from {}: {}", path, e))
        })
    }

    /// Execute a GET request.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> LeadMagicResult<T> {
        let url = self.build_url(path)?;
        let body = self.send(self.client.get(url), &Method::GET, path).await?;
        Self::decode(path, body)
    }

    /// Execute a POST request with a JSON body.
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> LeadMagicResult<T> {
        let url = self.build_url(path)?;
        let body = self
            .send(self.client.post(url).json(body), &Method::POST, path)
            .await?;
        Self::decode(path, body)
    }

    /// Validate `request` against its schema, execute it and return the
    /// success body exactly as the API sent it.
    ///
    /// The body that goes on the wire is the normalized output of the schema,
    /// so nothing reaches the network without passing validation.
    pub async fn execute_raw<E: Endpoint>(&self, request: &E) -> LeadMagicResult<Value> {
        let raw = serde_json::to_value(request)
            .map_err(|e| LeadMagicError::unknown(format!("Failed to encode request: {}", e)))?;
        let params = E::schema().validate(&raw)?;

        let url = self.build_url(E::PATH)?;
        if E::METHOD == Method::GET {
            self.send(self.client.get(url), &Method::GET, E::PATH).await
        } else if E::METHOD == Method::POST {
            self.send(self.client.post(url).json(&params), &Method::POST, E::PATH)
                .await
        } else {
            Err(LeadMagicError::unknown(format!(
                "Unsupported HTTP method {} for {}",
                E::METHOD,
                E::PATH
            )))
        }
    }

    /// Validate and execute `request`, decoding the typed response.
    pub async fn execute<E: Endpoint>(&self, request: &E) -> LeadMagicResult<E::Response> {
        let body = self.execute_raw(request).await?;
        Self::decode(E::PATH, body)
    }
}
