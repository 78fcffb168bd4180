//! Error types for the eBay adapter
//!
//! Every failure that crosses the gateway boundary is an [`EbayError`].
//! The gateway never wraps or rewrites a failure it did not produce itself:
//! transport, remote and refresh errors reach the caller as they were raised.

use thiserror::Error;

/// eBay error code for "IAF token expired" (OAuth access token rejected)
pub const IAF_TOKEN_EXPIRED_CODE: i64 = 21917053;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, EbayError>;

/// Errors raised by the eBay adapter
#[derive(Debug, Error)]
pub enum EbayError {
    /// Target API prerequisites are unmet (raised when a service is built)
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Call name is not registered for the target API
    #[error("unsupported call '{call}' for {api} API")]
    UnsupportedCall { api: &'static str, call: String },

    /// eBay answered with `Ack=Failure`
    #[error("eBay API error {code} ({severity}): {message}")]
    Api { code: i64, severity: String, message: String },

    /// The token refresh collaborator failed
    #[error("token refresh failed: {0}")]
    Refresh(String),

    /// Non-success HTTP status without a parsable eBay error
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Network-level failure (timeouts included)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl EbayError {
    /// eBay error code, when the remote service supplied one
    pub fn code(&self) -> Option<i64> {
        match self {
            EbayError::Api { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// True for the "IAF token expired" signal
    pub fn is_auth_expired(&self) -> bool {
        self.code() == Some(IAF_TOKEN_EXPIRED_CODE)
    }
}
