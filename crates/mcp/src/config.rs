use anyhow::{bail, Context, Result};
use leadmagic_sdk::{LeadMagicClient, DEFAULT_BASE_URL};
use std::time::Duration;

pub const API_KEY_VAR: &str = "LEADMAGIC_API_KEY";
pub const BASE_URL_VAR: &str = "LEADMAGIC_BASE_URL";
pub const TIMEOUT_VAR: &str = "LEADMAGIC_TIMEOUT_SECS";
pub const DEBUG_VAR: &str = "LEADMAGIC_DEBUG";

/// Server settings read from the environment at startup.
#[derive(Clone)]
pub struct McpConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Option<Duration>,
    pub debug: bool,
}

impl std::fmt::Debug for McpConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("McpConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("debug", &self.debug)
            .finish()
    }
}

impl McpConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the config from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_key = match lookup(API_KEY_VAR).map(|k| k.trim().to_string()) {
            Some(key) if !key.is_empty() => key,
            _ => bail!("{} is not set", API_KEY_VAR),
        };

        let base_url = lookup(BASE_URL_VAR)
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout = match lookup(TIMEOUT_VAR) {
            Some(raw) => {
                let secs: u64 = raw
                    .trim()
                    .parse()
                    .with_context(|| format!("{} must be a whole number of seconds", TIMEOUT_VAR))?;
                if secs == 0 {
                    bail!("{} must be greater than zero", TIMEOUT_VAR);
                }
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        let debug = lookup(DEBUG_VAR).is_some_and(|v| is_truthy(&v));

        Ok(Self {
            api_key,
            base_url,
            timeout,
            debug,
        })
    }

    /// Build the shared API client.
    pub fn client(&self) -> Result<LeadMagicClient> {
        let mut builder = LeadMagicClient::builder()
            .api_key(self.api_key.clone())
            .base_url(self.base_url.clone());
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        builder.build().context("Invalid LeadMagic client configuration")
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
