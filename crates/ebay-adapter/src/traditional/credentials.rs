//! Credential resolution
//!
//! Decides which token goes on a request:
//! - bearer (IAF) token when it exists and the call asked for it, or when
//!   there is no Auth'n'Auth token at all
//! - otherwise the Auth'n'Auth token, which is returned next to the headers
//!   for the envelope builder
//!
//! Caller header overrides are applied last.

use crate::auth::CredentialSnapshot;
use crate::types::{merge_headers, CallOptions, Headers};

use super::api::TargetApi;

/// Headers plus the Auth'n'Auth token to embed in the body, if any
#[derive(Clone, PartialEq, Eq)]
pub struct ResolvedCredentials {
    pub headers: Headers,
    pub auth_token: Option<String>,
}

impl std::fmt::Debug for ResolvedCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedCredentials")
            .field("headers", &self.headers.keys().collect::<Vec<_>>())
            .field("auth_token", &self.auth_token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Resolve headers and body token for one call attempt
pub fn resolve(
    api: &TargetApi,
    call_name: &str,
    options: &CallOptions,
    credentials: &CredentialSnapshot,
) -> ResolvedCredentials {
    let use_bearer = credentials.auth_token.is_none() || options.use_iaf;
    let bearer = credentials.access_token.as_deref().filter(|_| use_bearer);

    let mut headers = api.headers.headers(call_name, bearer);
    merge_headers(&mut headers, &options.headers);

    let auth_token = if bearer.is_some() { None } else { credentials.auth_token.clone() };

    ResolvedCredentials { headers, auth_token }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EbayConfig;

    fn trading() -> TargetApi {
        let mut config = EbayConfig::new("app", "cert");
        config.dev_id = Some("dev".to_string());
        config.site_id = Some(0);
        TargetApi::trading(&config).unwrap()
    }

    fn snapshot(auth_token: Option<&str>, access_token: Option<&str>) -> CredentialSnapshot {
        CredentialSnapshot {
            auth_token: auth_token.map(str::to_string),
            access_token: access_token.map(str::to_string),
        }
    }

    #[test]
    fn test_legacy_token_preferred_by_default() {
        let resolved =
            resolve(&trading(), "GetItem", &CallOptions::default(), &snapshot(Some("legacy"), Some("bearer")));
        assert_eq!(resolved.auth_token.as_deref(), Some("legacy"));
        assert!(!resolved.headers.contains_key("X-EBAY-API-IAF-TOKEN"));
    }

    #[test]
    fn test_use_iaf_prefers_bearer() {
        let options = CallOptions::new().use_iaf();
        let resolved = resolve(&trading(), "GetItem", &options, &snapshot(Some("legacy"), Some("bearer")));
        assert_eq!(resolved.auth_token, None);
        assert_eq!(resolved.headers["X-EBAY-API-IAF-TOKEN"], "bearer");
    }

    #[test]
    fn test_bearer_used_when_no_legacy_token() {
        let resolved =
            resolve(&trading(), "GetItem", &CallOptions::default(), &snapshot(None, Some("bearer")));
        assert_eq!(resolved.auth_token, None);
        assert_eq!(resolved.headers["X-EBAY-API-IAF-TOKEN"], "bearer");
    }

    #[test]
    fn test_use_iaf_without_bearer_keeps_legacy_token() {
        let options = CallOptions::new().use_iaf();
        let resolved = resolve(&trading(), "GetItem", &options, &snapshot(Some("legacy"), None));
        assert_eq!(resolved.auth_token.as_deref(), Some("legacy"));
        assert!(!resolved.headers.contains_key("X-EBAY-API-IAF-TOKEN"));
    }

    #[test]
    fn test_no_credentials() {
        let resolved = resolve(&trading(), "GeteBayOfficialTime", &CallOptions::default(), &snapshot(None, None));
        assert_eq!(resolved.auth_token, None);
        assert!(!resolved.headers.contains_key("X-EBAY-API-IAF-TOKEN"));
    }

    #[test]
    fn test_overrides_win() {
        let options = CallOptions::new()
            .use_iaf()
            .with_header("X-EBAY-API-IAF-TOKEN", "override")
            .with_header("X-EBAY-API-SITEID", "3");
        let resolved = resolve(&trading(), "GetItem", &options, &snapshot(None, Some("bearer")));
        assert_eq!(resolved.headers["X-EBAY-API-IAF-TOKEN"], "override");
        assert_eq!(resolved.headers["X-EBAY-API-SITEID"], "3");
    }
}
