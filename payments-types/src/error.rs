//! Error types for the payments API client.

/// Failure of a single request through the gateway.
///
/// This is the only error kind in the client. Multi-step operations return
/// the error of the step that failed without wrapping it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("API error: {status} {code} - {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl GatewayError {
    /// Builds an API error from its parts.
    pub fn api(status: u16, code: impl Into<String>, message: impl Into<String>) -> Self {
        GatewayError::Api {
            status,
            code: code.into(),
            message: message.into(),
        }
    }

    /// True for a remote `404` / `not_found`.
    pub fn is_not_found(&self) -> bool {
        matches!(self, GatewayError::Api { status: 404, .. })
            || matches!(self, GatewayError::Api { code, .. } if code == "not_found")
    }

    /// HTTP status reported by the remote service, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            GatewayError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        GatewayError::InvalidResponse(err.to_string())
    }
}
