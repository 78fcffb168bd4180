//! Request building
//!
//! # Algorithm
//! 1. Pick the endpoint for the configured environment
//! 2. Resolve headers and body token from the current credentials
//! 3. Attach namespace and fields
//!
//! A [`ResolvedRequestConfig`] belongs to exactly one attempt. The retry
//! after a token refresh builds a new one, so it never carries the token
//! that was just rejected.

use crate::auth::CredentialSnapshot;
use crate::error::Result;
use crate::types::{merge_headers, CallOptions, Fields, Headers, HttpRequest};

use super::api::{Protocol, TargetApi};
use super::credentials;
use super::query::QueryParams;
use super::xml::EnvelopeBuilder;

/// Everything needed to send one attempt of one call
#[derive(Clone, PartialEq, Eq)]
pub struct ResolvedRequestConfig {
    pub call_name: String,
    pub endpoint: String,
    pub headers: Headers,
    pub xmlns: Option<&'static str>,
    pub fields: Fields,
    /// Auth'n'Auth token for the XML envelope (never a header)
    pub auth_token: Option<String>,
}

impl std::fmt::Debug for ResolvedRequestConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedRequestConfig")
            .field("call_name", &self.call_name)
            .field("endpoint", &self.endpoint)
            .field("headers", &self.headers.keys().collect::<Vec<_>>())
            .field("xmlns", &self.xmlns)
            .field("auth_token", &self.auth_token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Builds request configs for one target API
#[derive(Clone, Debug)]
pub struct RequestBuilder {
    api: TargetApi,
    sandbox: bool,
}

impl RequestBuilder {
    pub fn new(api: TargetApi, sandbox: bool) -> Self {
        Self { api, sandbox }
    }

    pub fn api(&self) -> &TargetApi {
        &self.api
    }

    pub fn build(
        &self,
        call_name: &str,
        fields: &Fields,
        options: &CallOptions,
        credentials: &CredentialSnapshot,
    ) -> Result<ResolvedRequestConfig> {
        let endpoint = self.api.endpoint.select(self.sandbox)?.to_string();
        let resolved = credentials::resolve(&self.api, call_name, options, credentials);

        Ok(ResolvedRequestConfig {
            call_name: call_name.to_string(),
            endpoint,
            headers: resolved.headers,
            xmlns: self.api.xmlns(),
            fields: fields.clone(),
            auth_token: resolved.auth_token,
        })
    }

    /// Turn a config into the HTTP request for this API's protocol
    pub fn to_http_request(
        &self,
        config: &ResolvedRequestConfig,
        envelope: &dyn EnvelopeBuilder,
    ) -> Result<HttpRequest> {
        match &self.api.protocol {
            Protocol::Xml { xmlns } => {
                let body = envelope.serialize(
                    xmlns,
                    &config.call_name,
                    &config.fields,
                    config.auth_token.as_deref(),
                )?;
                let mut headers = Headers::new();
                headers.insert("Content-Type".to_string(), "text/xml".to_string());
                merge_headers(&mut headers, &config.headers);

                Ok(HttpRequest::post(&config.endpoint).with_headers(headers).with_body(body))
            }
            Protocol::Query { params } => {
                let mut query = QueryParams::new();
                for (key, value) in params {
                    query.set(key.as_str(), value.as_str());
                }
                query.extend_fields(&config.fields);
                query.set("callname", config.call_name.as_str());

                Ok(HttpRequest::get(query.apply_to(&config.endpoint)?).with_headers(config.headers.clone()))
            }
        }
    }
}
