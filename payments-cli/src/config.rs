//! Configuration loading from environment.

use std::env;
use std::time::Duration;

use payments_client::PaymentsClient;

const DEFAULT_API_URL: &str = "http://localhost:3000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_url: String,
    pub secret_key: String,
    pub api_version: Option<String>,
    pub timeout: Duration,
}

impl Config {
    /// Loads configuration from environment variables, with command-line
    /// values taking precedence.
    pub fn from_env(api_url: Option<&str>, secret_key: Option<&str>) -> anyhow::Result<Self> {
        Self::from_lookup(|name| match name {
            "PAYMENTS_API_URL" if api_url.is_some() => api_url.map(String::from),
            "PAYMENTS_SECRET_KEY" if secret_key.is_some() => secret_key.map(String::from),
            _ => env::var(name).ok(),
        })
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let api_url = lookup("PAYMENTS_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let secret_key = lookup("PAYMENTS_SECRET_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| anyhow::anyhow!("PAYMENTS_SECRET_KEY environment variable is required"))?;

        let api_version = lookup("PAYMENTS_API_VERSION").filter(|v| !v.trim().is_empty());

        let timeout_secs = match lookup("PAYMENTS_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse()
                .map_err(|_| anyhow::anyhow!("PAYMENTS_TIMEOUT_SECS must be a number of seconds, got {raw:?}"))?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            api_url,
            secret_key,
            api_version,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Builds a client from this configuration.
    pub fn client(&self) -> PaymentsClient {
        let client = PaymentsClient::new(&self.api_url)
            .with_secret_key(&self.secret_key)
            .with_timeout(self.timeout);
        match &self.api_version {
            Some(version) => client.with_api_version(version),
            None => client,
        }
    }
}
