//! Main client for the LeadMagic SDK.

use crate::api::*;
use crate::config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use crate::endpoint::Endpoint;
use crate::error::{ConfigError, LeadMagicResult};
use crate::transport::HttpTransport;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Main client for interacting with the LeadMagic API.
///
/// Cheap to clone; clones share the same immutable configuration and
/// connection pool.
#[derive(Debug, Clone)]
pub struct LeadMagicClient {
    config: Arc<ClientConfig>,
    pub(crate) http: HttpTransport,
}

impl LeadMagicClient {
    /// Create a new client builder.
    pub fn builder() -> LeadMagicClientBuilder {
        LeadMagicClientBuilder::new()
    }

    /// Create a client for the production API.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ConfigError> {
        Self::builder().api_key(api_key).build()
    }

    /// Create a client from configuration.
    fn from_config(config: ClientConfig) -> Result<Self, ConfigError> {
        let config = Arc::new(config);
        let http = HttpTransport::new(config.clone())?;

        Ok(Self { config, http })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Validate and execute any endpoint request.
    pub async fn execute<E: Endpoint>(&self, request: &E) -> LeadMagicResult<E::Response> {
        self.http.execute(request).await
    }

    /// Validate and execute any endpoint request, returning the success body
    /// as the API sent it.
    pub async fn execute_raw<E: Endpoint>(&self, request: &E) -> LeadMagicResult<serde_json::Value> {
        self.http.execute_raw(request).await
    }

    /// Get the account API.
    pub fn account(&self) -> AccountApi<'_> {
        AccountApi::new(self)
    }

    /// Get the emails API.
    pub fn emails(&self) -> EmailsApi<'_> {
        EmailsApi::new(self)
    }

    /// Get the profiles API.
    pub fn profiles(&self) -> ProfilesApi<'_> {
        ProfilesApi::new(self)
    }

    /// Get the companies API.
    pub fn companies(&self) -> CompaniesApi<'_> {
        CompaniesApi::new(self)
    }

    /// Get the people API.
    pub fn people(&self) -> PeopleApi<'_> {
        PeopleApi::new(self)
    }

    /// Get the jobs API.
    pub fn jobs(&self) -> JobsApi<'_> {
        JobsApi::new(self)
    }

    /// Get the ads API.
    pub fn ads(&self) -> AdsApi<'_> {
        AdsApi::new(self)
    }
}

/// Builder for creating a LeadMagicClient.
pub struct LeadMagicClientBuilder {
    base_url: Option<String>,
    api_key: Option<String>,
    timeout: Duration,
    user_agent: Option<String>,
}

impl LeadMagicClientBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            base_url: None,
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
            user_agent: None,
        }
    }

    /// Override the API base URL. Defaults to the production API.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the API key for authentication.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<LeadMagicClient, ConfigError> {
        let api_key = self
            .api_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let base_url = Url::parse(self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))?;
        if base_url.scheme() != "http" && base_url.scheme() != "https" {
            return Err(ConfigError::UnsupportedScheme(base_url.scheme().to_string()));
        }

        let mut config = ClientConfig::new(base_url, api_key);
        config.timeout = self.timeout;
        if let Some(user_agent) = self.user_agent {
            config.user_agent = user_agent;
        }

        LeadMagicClient::from_config(config)
    }
}

impl Default for LeadMagicClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_requires_api_key() {
        assert!(matches!(
            LeadMagicClient::builder().build(),
            Err(ConfigError::MissingApiKey)
        ));
        assert!(matches!(
            LeadMagicClient::new("   "),
            Err(ConfigError::MissingApiKey)
        ));
    }

    #[test]
    fn test_builder_defaults() {
        let client = LeadMagicClient::new("lm-key").unwrap();

        assert_eq!(client.config().base_url.as_str(), "https://api.leadmagic.io/");
        assert_eq!(client.config().timeout, Duration::from_secs(30));
        assert_eq!(client.config().api_key, "lm-key");
    }

    #[test]
    fn test_builder_overrides() {
        let client = LeadMagicClient::builder()
            .api_key("lm-key")
            .base_url("http://localhost:9000/v1")
            .timeout(Duration::from_secs(5))
            .user_agent("custom/1.0")
            .build()
            .unwrap();

        assert_eq!(client.config().base_url.as_str(), "http://localhost:9000/v1/");
        assert_eq!(client.config().timeout, Duration::from_secs(5));
        assert_eq!(client.config().user_agent, "custom/1.0");
    }

    #[test]
    fn test_builder_rejects_bad_urls() {
        assert!(matches!(
            LeadMagicClient::builder().api_key("k").base_url("not a url").build(),
            Err(ConfigError::InvalidUrl(_))
        ));
        assert!(matches!(
            LeadMagicClient::builder().api_key("k").base_url("ftp://example.com").build(),
            Err(ConfigError::UnsupportedScheme(_))
        ));
    }
}
