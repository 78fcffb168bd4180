//! REST eBay APIs
//!
//! Thin GET wrappers: a static path under an API base path, query params,
//! and per-call headers. Requests carry the current OAuth2 access token as
//! a bearer token.
//!
//! # Error format
//! ```json
//! {"errors": [{"errorId": 1001, "category": "REQUEST", "message": "..."}]}
//! ```

pub mod analytics;
pub mod feed;

use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use crate::auth::Auth;
use crate::config::EbayConfig;
use crate::error::{EbayError, Result};
use crate::transport::Transport;
use crate::types::{Headers, HttpRequest, HttpResponse};
use crate::{REST_API_BASE, REST_API_SANDBOX_BASE};

pub use analytics::Analytics;
pub use feed::{Feed, FeedParams};

/// Shared GET plumbing for one REST API
#[derive(Clone)]
pub struct RestfulApi {
    base_url: String,
    base_path: &'static str,
    auth: Arc<Auth>,
    transport: Arc<dyn Transport>,
}

impl RestfulApi {
    pub fn new(
        config: &EbayConfig,
        base_path: &'static str,
        auth: Arc<Auth>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        let base = if config.sandbox { REST_API_SANDBOX_BASE } else { REST_API_BASE };
        Self::with_base_url(base, base_path, auth, transport)
    }

    /// Custom host (for testing)
    pub fn with_base_url(
        base_url: &str,
        base_path: &'static str,
        auth: Arc<Auth>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self { base_url: base_url.trim_end_matches('/').to_string(), base_path, auth, transport }
    }

    /// GET `{base}{base_path}{path}`; absent params are skipped
    pub async fn get(
        &self,
        path: &str,
        params: &[(&str, Option<&str>)],
        headers: Headers,
    ) -> Result<HttpResponse> {
        let url = format!("{}{}{}", self.base_url, self.base_path, path);
        let mut request = HttpRequest::get(&url).with_headers(headers);

        for (name, value) in params {
            if let Some(value) = value {
                request = request.with_param(*name, *value);
            }
        }
        if let Some(token) = self.auth.oauth2.access_token().await.filter(|t| !t.is_empty()) {
            request = request.with_header("Authorization", format!("Bearer {}", token));
        }

        debug!("GET {}", url);
        let response = self.transport.send(request).await?;
        if response.is_success() {
            return Ok(response);
        }
        Err(rest_error(response))
    }
}

fn rest_error(response: HttpResponse) -> EbayError {
    let parsed = response.json().ok();
    let first = parsed.as_ref().and_then(|v| v.get("errors")).and_then(|e| e.get(0));

    match first {
        Some(error) => EbayError::Api {
            code: error.get("errorId").and_then(Value::as_i64).unwrap_or(0),
            severity: error
                .get("category")
                .and_then(Value::as_str)
                .unwrap_or("Error")
                .to_string(),
            message: error
                .get("longMessage")
                .or_else(|| error.get("message"))
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
        },
        None => EbayError::Status { status: response.status, body: response.text() },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rest_error_with_error_list() {
        let body = r#"{"errors":[{"errorId":1100,"category":"REQUEST","message":"Access denied"}]}"#;
        let err = rest_error(HttpResponse::new(403, body));
        match err {
            EbayError::Api { code, severity, message } => {
                assert_eq!(code, 1100);
                assert_eq!(severity, "REQUEST");
                assert_eq!(message, "Access denied");
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_rest_error_without_body() {
        let err = rest_error(HttpResponse::new(502, "bad gateway"));
        assert!(matches!(err, EbayError::Status { status: 502, .. }));
    }
}
