//! Configuration types for the LeadMagic SDK.

use std::fmt;
use std::time::Duration;
use url::Url;

/// Production API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.leadmagic.io";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// User agent sent with every request.
pub const USER_AGENT: &str = concat!("leadmagic-sdk-rust/", env!("CARGO_PKG_VERSION"));

/// Configuration for the LeadMagic client.
///
/// Immutable once the client is built; shared between clones of the client.
#[derive(Clone)]
pub struct ClientConfig {
    /// Base URL of the API. Always ends with `/` so paths join beneath it.
    pub base_url: Url,
    /// API key sent in the `X-API-Key` header.
    pub api_key: String,
    /// Request timeout.
    pub timeout: Duration,
    /// User agent header.
    pub user_agent: String,
}

impl ClientConfig {
    /// Create a configuration with the given base URL and API key.
    pub fn new(base_url: Url, api_key: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            api_key: api_key.into(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: USER_AGENT.to_string(),
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// Ensure the URL path ends with `/` so relative joins keep any path prefix.
pub(crate) fn normalize_base_url(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_config_defaults() {
        let config = ClientConfig::new(Url::parse(DEFAULT_BASE_URL).unwrap(), "lm-key");

        assert_eq!(config.base_url.as_str(), "https://api.leadmagic.io/");
        assert_eq!(config.api_key, "lm-key");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.user_agent.starts_with("leadmagic-sdk-rust/"));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = ClientConfig::new(Url::parse(DEFAULT_BASE_URL).unwrap(), "super-secret-key");
        let debug = format!("{:?}", config);

        assert!(!debug.contains("super-secret-key"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_normalize_base_url_keeps_prefix() {
        let url = normalize_base_url(Url::parse("http://localhost:8080/proxy").unwrap());
        assert_eq!(url.join("credits").unwrap().as_str(), "http://localhost:8080/proxy/credits");

        let url = normalize_base_url(Url::parse("http://localhost:8080").unwrap());
        assert_eq!(url.as_str(), "http://localhost:8080/");
    }
}
