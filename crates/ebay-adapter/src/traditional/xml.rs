//! XML envelope construction and response inspection
//!
//! # Envelope
//! ```xml
//! <?xml version="1.0" encoding="utf-8"?>
//! <GetItemRequest xmlns="urn:ebay:apis:eBLBaseComponents">
//!   <RequesterCredentials><eBayAuthToken>...</eBayAuthToken></RequesterCredentials>
//!   <ItemID>123</ItemID>
//! </GetItemRequest>
//! ```
//!
//! Field mapping:
//! - objects nest, arrays repeat the element
//! - keys prefixed with `@_` become attributes, `#value` becomes text
//!
//! # Responses
//! Only `Ack`/`ack` and the first error block are read. A successful body
//! is never rewritten.

use serde_json::Value;

use crate::error::{EbayError, Result};
use crate::types::{Fields, HttpResponse};

const ATTRIBUTE_PREFIX: &str = "@_";
const TEXT_KEY: &str = "#value";

// ============================================================================
// Collaborator seams
// ============================================================================

/// Serializes a call into its XML body
pub trait EnvelopeBuilder: Send + Sync {
    fn serialize(
        &self,
        xmlns: &str,
        call_name: &str,
        fields: &Fields,
        auth_token: Option<&str>,
    ) -> Result<String>;
}

/// Turns a raw transport response into success or an [`EbayError`]
pub trait ResponseParser: Send + Sync {
    fn parse(&self, response: HttpResponse) -> Result<HttpResponse>;
}

/// Decides whether a failure is the retryable "token expired" signal
pub trait ErrorClassifier: Send + Sync {
    fn is_auth_expired(&self, error: &EbayError) -> bool;
}

// ============================================================================
// Default implementations
// ============================================================================

#[derive(Clone, Copy, Debug, Default)]
pub struct XmlEnvelope;

impl EnvelopeBuilder for XmlEnvelope {
    fn serialize(
        &self,
        xmlns: &str,
        call_name: &str,
        fields: &Fields,
        auth_token: Option<&str>,
    ) -> Result<String> {
        let root = format!("{}Request", call_name);
        let mut out = String::from(r#"<?xml version="1.0" encoding="utf-8"?>"#);

        out.push('<');
        out.push_str(&root);
        out.push_str(" xmlns=\"");
        out.push_str(&escape(xmlns));
        out.push('"');
        write_attributes(&mut out, fields);
        out.push('>');

        if let Some(token) = auth_token {
            out.push_str("<RequesterCredentials><eBayAuthToken>");
            out.push_str(&escape(token));
            out.push_str("</eBayAuthToken></RequesterCredentials>");
        }
        write_children(&mut out, fields);

        out.push_str("</");
        out.push_str(&root);
        out.push('>');
        Ok(out)
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct XmlResponseParser;

impl ResponseParser for XmlResponseParser {
    fn parse(&self, response: HttpResponse) -> Result<HttpResponse> {
        let body = response.text();
        let ack = element_text(&body, "Ack").or_else(|| element_text(&body, "ack"));
        let failed = ack.map(|a| a.eq_ignore_ascii_case("Failure")).unwrap_or(false);

        if failed || !response.is_success() {
            if let Some(error) = api_error(&body) {
                return Err(error);
            }
        }
        if !response.is_success() {
            return Err(EbayError::Status { status: response.status, body });
        }
        if failed {
            return Err(EbayError::Api {
                code: 0,
                severity: "Error".to_string(),
                message: "request failed without error details".to_string(),
            });
        }
        Ok(response)
    }
}

/// Matches the "IAF token expired" error code
#[derive(Clone, Copy, Debug, Default)]
pub struct IafTokenExpired;

impl ErrorClassifier for IafTokenExpired {
    fn is_auth_expired(&self, error: &EbayError) -> bool {
        error.is_auth_expired()
    }
}

// ============================================================================
// Serialization helpers
// ============================================================================

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

fn unescape(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn write_attributes(out: &mut String, map: &Fields) {
    for (key, value) in map {
        if let Some(name) = key.strip_prefix(ATTRIBUTE_PREFIX) {
            if let Some(text) = scalar_text(value) {
                out.push(' ');
                out.push_str(name);
                out.push_str("=\"");
                out.push_str(&escape(&text));
                out.push('"');
            }
        }
    }
}

fn write_children(out: &mut String, map: &Fields) {
    for (key, value) in map {
        if key.starts_with(ATTRIBUTE_PREFIX) {
            continue;
        }
        if key == TEXT_KEY {
            if let Some(text) = scalar_text(value) {
                out.push_str(&escape(&text));
            }
            continue;
        }
        write_element(out, key, value);
    }
}

fn write_element(out: &mut String, name: &str, value: &Value) {
    match value {
        Value::Array(items) => {
            for item in items {
                write_element(out, name, item);
            }
        }
        Value::Object(map) => {
            out.push('<');
            out.push_str(name);
            write_attributes(out, map);
            out.push('>');
            write_children(out, map);
            out.push_str("</");
            out.push_str(name);
            out.push('>');
        }
        Value::Null => {
            out.push('<');
            out.push_str(name);
            out.push_str("/>");
        }
        scalar => {
            let text = scalar_text(scalar).unwrap_or_default();
            out.push('<');
            out.push_str(name);
            out.push('>');
            out.push_str(&escape(&text));
            out.push_str("</");
            out.push_str(name);
            out.push('>');
        }
    }
}

// ============================================================================
// Response inspection
// ============================================================================

/// Text content of the first element whose local name is `local_name`
pub fn element_text(body: &str, local_name: &str) -> Option<String> {
    element_inner(body, local_name).map(|inner| unescape(inner.trim()))
}

/// Raw content between the open and close tags of the first element named `local_name`
fn element_inner<'a>(body: &'a str, local_name: &str) -> Option<&'a str> {
    let mut cursor = 0;
    while let Some(offset) = body[cursor..].find('<') {
        let tag_start = cursor + offset + 1;
        let tag_len = body[tag_start..].find('>')?;
        let tag = &body[tag_start..tag_start + tag_len];
        cursor = tag_start + tag_len + 1;

        if tag.starts_with(['/', '?', '!']) || tag.ends_with('/') {
            continue;
        }
        let name = tag.split_whitespace().next().unwrap_or_default();
        let local = name.rsplit(':').next().unwrap_or(name);
        if local != local_name {
            continue;
        }

        let close = format!("</{}>", name);
        let end = body[cursor..].find(&close)?;
        return Some(&body[cursor..cursor + end]);
    }
    None
}

/// First eBay error in a response body (Trading/Shopping or Finding layout)
///
/// Every field is read from the same error block.
fn api_error(body: &str) -> Option<EbayError> {
    let block = element_inner(body, "Errors").or_else(|| element_inner(body, "error")).unwrap_or(body);

    let code = element_text(block, "ErrorCode").or_else(|| element_text(block, "errorId"))?;
    let severity = element_text(block, "SeverityCode")
        .or_else(|| element_text(block, "severity"))
        .unwrap_or_else(|| "Error".to_string());
    let message = element_text(block, "LongMessage")
        .or_else(|| element_text(block, "ShortMessage"))
        .or_else(|| element_text(block, "message"))
        .unwrap_or_default();

    Some(EbayError::Api { code: code.trim().parse().unwrap_or(0), severity, message })
}
