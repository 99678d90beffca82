//! HTTP request gateway.

use std::time::Duration;

use async_trait::async_trait;
use payments_types::{ApiRequest, GatewayError, Method, RequestGateway};
use reqwest::Client;
use reqwest::header::USER_AGENT;

use crate::resources::{Cards, Charges, Customers, Schedules};

/// Header carrying the pinned API version.
pub const API_VERSION_HEADER: &str = "X-Api-Version";

const CLIENT_USER_AGENT: &str = concat!("payments-client/", env!("CARGO_PKG_VERSION"));

/// Payments API client.
///
/// Implements [`RequestGateway`] over HTTPS: one request per call, secret key
/// sent as HTTP basic auth, no retries. Cloning is cheap and shares the
/// underlying connection pool.
#[derive(Debug, Clone)]
pub struct PaymentsClient {
    base_url: String,
    secret_key: Option<String>,
    api_version: Option<String>,
    timeout: Option<Duration>,
    http: Client,
}

impl PaymentsClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            secret_key: None,
            api_version: None,
            timeout: None,
            http: Client::new(),
        }
    }

    /// Sets the secret key used for authentication.
    pub fn with_secret_key(mut self, secret_key: impl Into<String>) -> Self {
        self.secret_key = Some(secret_key.into());
        self
    }

    /// Pins the API version sent with every request.
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = Some(version.into());
        self
    }

    /// Sets a per-request timeout. A timed out request fails with a
    /// transport error.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Charge operations.
    pub fn charges(&self) -> Charges<PaymentsClient> {
        Charges::new(self.clone())
    }

    /// Customer operations.
    pub fn customers(&self) -> Customers<PaymentsClient> {
        Customers::new(self.clone())
    }

    /// Operations on cards stored on customers.
    pub fn cards(&self) -> Cards<PaymentsClient> {
        Cards::new(self.clone())
    }

    /// Schedule operations.
    pub fn schedules(&self) -> Schedules<PaymentsClient> {
        Schedules::new(self.clone())
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn handle_response(
        &self,
        resp: reqwest::Response,
    ) -> Result<serde_json::Value, GatewayError> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await.map_err(transport)?;
            if body.trim().is_empty() {
                return Ok(serde_json::Value::Null);
            }
            Ok(serde_json::from_str(&body)?)
        } else {
            let body = resp.text().await.unwrap_or_default();
            let parsed = serde_json::from_str::<serde_json::Value>(&body).ok();
            let field = |name: &str| {
                parsed
                    .as_ref()
                    .and_then(|v| v.get(name).and_then(|e| e.as_str()).map(String::from))
            };
            let code = field("code").unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("unknown")
                    .to_lowercase()
                    .replace(' ', "_")
            });
            let message = field("message").unwrap_or(body);
            tracing::warn!(status = status.as_u16(), %code, "API request failed: {}", message);
            Err(GatewayError::Api {
                status: status.as_u16(),
                code,
                message,
            })
        }
    }
}

#[async_trait]
impl RequestGateway for PaymentsClient {
    async fn send(&self, request: ApiRequest) -> Result<serde_json::Value, GatewayError> {
        tracing::debug!(method = %request.method, path = %request.path, "sending API request");

        let mut req = self
            .http
            .request(http_method(request.method), self.url(&request.path))
            .header(USER_AGENT, CLIENT_USER_AGENT);
        if let Some(key) = &self.secret_key {
            req = req.basic_auth(key, None::<&str>);
        }
        if let Some(version) = &self.api_version {
            req = req.header(API_VERSION_HEADER, version);
        }
        if let Some(timeout) = self.timeout {
            req = req.timeout(timeout);
        }
        if let Some(params) = &request.params {
            req = req.query(params);
        }
        if let Some(data) = &request.data {
            req = req.json(data);
        }

        let resp = req.send().await.map_err(transport)?;
        self.handle_response(resp).await
    }
}

fn http_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Patch => reqwest::Method::PATCH,
        Method::Delete => reqwest::Method::DELETE,
    }
}

fn transport(err: reqwest::Error) -> GatewayError {
    GatewayError::Transport(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = PaymentsClient::new("https://api.example.com");
        assert_eq!(client.base_url(), "https://api.example.com");
    }

    #[test]
    fn test_client_with_trailing_slash() {
        let client = PaymentsClient::new("https://api.example.com/");
        assert_eq!(client.base_url(), "https://api.example.com");
    }

    #[test]
    fn test_client_with_secret_key() {
        let client = PaymentsClient::new("https://api.example.com").with_secret_key("skey_test");
        assert_eq!(client.secret_key, Some("skey_test".to_string()));
    }

    #[test]
    fn test_url_joins_path() {
        let client = PaymentsClient::new("https://api.example.com/");
        assert_eq!(
            client.url("customers/cust_1/schedules"),
            "https://api.example.com/customers/cust_1/schedules"
        );
        assert_eq!(client.url("/charges"), "https://api.example.com/charges");
    }
}
