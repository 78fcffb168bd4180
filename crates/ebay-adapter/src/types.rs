//! Shared request/response types for the eBay adapter
//!
//! # Design Principles
//! 1. Call fields are opaque JSON objects; the gateway never inspects them
//! 2. Header maps are ordered (`BTreeMap`) so outbound requests are deterministic
//! 3. Response bodies are kept as raw bytes and handed back untouched

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Field set passed to a call (call-specific shape)
pub type Fields = Map<String, Value>;

/// HTTP header mapping
pub type Headers = BTreeMap<String, String>;

// ============================================================================
// Call options
// ============================================================================

/// Per-call options
///
/// Defaults: bearer token not preferred, no header overrides.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallOptions {
    /// Prefer the OAuth bearer token over the Auth'n'Auth token when both exist
    #[serde(default)]
    pub use_iaf: bool,

    /// Header overrides, merged over computed headers (overrides win)
    #[serde(default)]
    pub headers: Headers,
}

impl CallOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefer the bearer token for this call
    pub fn use_iaf(mut self) -> Self {
        self.use_iaf = true;
        self
    }

    /// Add a header override
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

/// Insert `overrides` into `headers`, replacing entries whose name matches
/// case-insensitively.
pub fn merge_headers(headers: &mut Headers, overrides: &Headers) {
    for (name, value) in overrides {
        headers.retain(|existing, _| !existing.eq_ignore_ascii_case(name));
        headers.insert(name.clone(), value.clone());
    }
}

// ============================================================================
// HTTP envelope
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

/// Outbound request handed to a [`crate::transport::Transport`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Headers,
    pub body: Option<String>,
    /// Query parameters appended by the transport
    pub params: Vec<(String, String)>,
}

impl HttpRequest {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self { method, url: url.into(), headers: Headers::new(), body: None, params: Vec::new() }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, url)
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.headers.extend(headers);
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((name.into(), value.into()));
        self
    }
}

/// Raw response returned by a transport
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self { status, body: body.into() }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body decoded as UTF-8 (lossy)
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Body parsed as JSON
    pub fn json(&self) -> crate::Result<Value> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_options_default() {
        let options = CallOptions::default();
        assert!(!options.use_iaf);
        assert!(options.headers.is_empty());
    }

    #[test]
    fn test_call_options_deserialize_camel_case() {
        let options: CallOptions =
            serde_json::from_str(r#"{"useIaf": true, "headers": {"X-A": "1"}}"#).unwrap();
        assert!(options.use_iaf);
        assert_eq!(options.headers.get("X-A").map(String::as_str), Some("1"));
    }

    #[test]
    fn test_merge_headers_override_is_case_insensitive() {
        let mut headers = Headers::new();
        headers.insert("X-EBAY-API-SITEID".to_string(), "0".to_string());
        headers.insert("X-EBAY-API-CALL-NAME".to_string(), "GetItem".to_string());

        let mut overrides = Headers::new();
        overrides.insert("x-ebay-api-siteid".to_string(), "77".to_string());
        merge_headers(&mut headers, &overrides);

        assert_eq!(headers.len(), 2);
        assert_eq!(headers.get("x-ebay-api-siteid").map(String::as_str), Some("77"));
        assert!(!headers.contains_key("X-EBAY-API-SITEID"));
    }

    #[test]
    fn test_response_success_range() {
        assert!(HttpResponse::new(200, "ok").is_success());
        assert!(!HttpResponse::new(500, "").is_success());
        assert_eq!(HttpResponse::new(200, "abc").text(), "abc");
    }
}
