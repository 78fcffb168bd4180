//! Process-wide eBay application configuration
//!
//! # Identifiers
//! - `app_id` / `cert_id` / `dev_id`: keys from the eBay developer program
//! - `site_id`: numeric eBay site (0 = US, 3 = UK, 77 = DE, ...)
//!
//! # Tokens
//! - `auth_token`: legacy Auth'n'Auth `eBayAuthToken`, embedded in XML bodies
//! - `access_token` / `refresh_token`: OAuth2 user token pair (IAF token)

use serde::{Deserialize, Serialize};

use crate::error::{EbayError, Result};

fn default_auto_refresh() -> bool {
    true
}

/// eBay application configuration
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EbayConfig {
    pub app_id: String,
    #[serde(default)]
    pub cert_id: String,
    #[serde(default)]
    pub dev_id: Option<String>,
    #[serde(default)]
    pub site_id: Option<i32>,
    /// Use sandbox endpoints instead of production
    #[serde(default)]
    pub sandbox: bool,
    /// Refresh the OAuth token and retry once when eBay reports it expired
    #[serde(default = "default_auto_refresh")]
    pub auto_refresh_token: bool,
    #[serde(default)]
    pub auth_token: Option<String>,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

impl EbayConfig {
    pub fn new(app_id: impl Into<String>, cert_id: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            cert_id: cert_id.into(),
            auto_refresh_token: true,
            ..Self::default()
        }
    }

    /// Load configuration from environment variables
    ///
    /// Expected env vars:
    /// - EBAY_APP_ID (required)
    /// - EBAY_CERT_ID, EBAY_DEV_ID, EBAY_SITE_ID
    /// - EBAY_SANDBOX, EBAY_AUTO_REFRESH_TOKEN (true/false/1/0)
    /// - EBAY_AUTH_TOKEN, EBAY_ACCESS_TOKEN, EBAY_REFRESH_TOKEN
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let app_id = non_empty("EBAY_APP_ID")
            .ok_or_else(|| EbayError::Configuration("EBAY_APP_ID is not set".to_string()))?;

        let site_id = match non_empty("EBAY_SITE_ID") {
            Some(raw) => Some(raw.trim().parse::<i32>().map_err(|_| {
                EbayError::Configuration(format!("EBAY_SITE_ID must be numeric, got '{}'", raw))
            })?),
            None => None,
        };

        Ok(Self {
            app_id,
            cert_id: non_empty("EBAY_CERT_ID").unwrap_or_default(),
            dev_id: non_empty("EBAY_DEV_ID"),
            site_id,
            sandbox: parse_flag("EBAY_SANDBOX", non_empty("EBAY_SANDBOX"), false)?,
            auto_refresh_token: parse_flag(
                "EBAY_AUTO_REFRESH_TOKEN",
                non_empty("EBAY_AUTO_REFRESH_TOKEN"),
                true,
            )?,
            auth_token: non_empty("EBAY_AUTH_TOKEN"),
            access_token: non_empty("EBAY_ACCESS_TOKEN"),
            refresh_token: non_empty("EBAY_REFRESH_TOKEN"),
        })
    }

    /// Developer id, if present and non-empty
    pub fn dev_id(&self) -> Option<&str> {
        self.dev_id.as_deref().filter(|id| !id.is_empty())
    }
}

fn parse_flag(key: &str, raw: Option<String>, default: bool) -> Result<bool> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(EbayError::Configuration(format!("{} must be a boolean, got '{}'", key, other))),
    }
}

impl std::fmt::Debug for EbayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "[REDACTED]");
        f.debug_struct("EbayConfig")
            .field("app_id", &self.app_id)
            .field("cert_id", &"[REDACTED]")
            .field("dev_id", &self.dev_id)
            .field("site_id", &self.site_id)
            .field("sandbox", &self.sandbox)
            .field("auto_refresh_token", &self.auto_refresh_token)
            .field("auth_token", &redact(&self.auth_token))
            .field("access_token", &redact(&self.access_token))
            .field("refresh_token", &redact(&self.refresh_token))
            .finish()
    }
}
