//! Request gateway port.
//!
//! The gateway owns transport: connection handling, authentication, and
//! decoding the response body into JSON. Resource accessors build an
//! [`ApiRequest`] and hand it over; nothing above this trait knows about
//! HTTP clients.

use serde::Serialize;

use crate::dto::PaginationParams;
use crate::error::GatewayError;

/// HTTP verb of an API call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Post => write!(f, "POST"),
            Method::Patch => write!(f, "PATCH"),
            Method::Delete => write!(f, "DELETE"),
        }
    }
}

/// A single call to the API.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the API root, e.g. `customers/cust_1/schedules`.
    pub path: String,
    pub params: Option<PaginationParams>,
    pub data: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            params: None,
            data: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::Patch, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Attaches list parameters; `None` leaves the query string empty.
    pub fn with_params(mut self, params: Option<PaginationParams>) -> Self {
        self.params = params;
        self
    }

    /// Attaches a JSON body.
    pub fn with_data<B: Serialize>(mut self, body: &B) -> Result<Self, GatewayError> {
        let data = serde_json::to_value(body)
            .map_err(|e| GatewayError::InvalidRequest(e.to_string()))?;
        self.data = Some(data);
        Ok(self)
    }
}

/// Port trait for dispatching API requests.
///
/// Implementations perform exactly one request per call and never retry;
/// failures are reported as [`GatewayError`].
#[async_trait::async_trait]
pub trait RequestGateway: Send + Sync {
    /// Sends the request and returns the decoded JSON body.
    async fn send(&self, request: ApiRequest) -> Result<serde_json::Value, GatewayError>;
}

#[async_trait::async_trait]
impl<G: RequestGateway + ?Sized> RequestGateway for std::sync::Arc<G> {
    async fn send(&self, request: ApiRequest) -> Result<serde_json::Value, GatewayError> {
        (**self).send(request).await
    }
}
