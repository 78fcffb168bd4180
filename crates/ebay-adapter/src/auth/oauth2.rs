//! OAuth2 user token store and refresh
//!
//! # Refresh Flow
//! POST {base}/identity/v1/oauth2/token
//! - Basic auth: `app_id:cert_id`
//! - Form body: `grant_type=refresh_token&refresh_token=...`
//!
//! eBay does not rotate the refresh token on a refresh grant, so the stored
//! refresh token is kept when the response omits one.
//!
//! # Source
//! - https://developer.ebay.com/api-docs/static/oauth-refresh-token-request.html

use chrono::{DateTime, Duration, Utc};
use futures::future::BoxFuture;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::config::EbayConfig;
use crate::error::{EbayError, Result};
use crate::{REST_API_BASE, REST_API_SANDBOX_BASE};

/// Identity token path
pub const TOKEN_PATH: &str = "/identity/v1/oauth2/token";

/// OAuth2 user token pair
#[derive(Clone, Serialize, Deserialize)]
pub struct OAuth2Token {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Expiry reported by the identity endpoint, informational only
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

impl OAuth2Token {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self { access_token: access_token.into(), refresh_token: None, expires_at: None }
    }

    pub fn with_refresh_token(mut self, refresh_token: impl Into<String>) -> Self {
        self.refresh_token = Some(refresh_token.into());
        self
    }
}

impl std::fmt::Debug for OAuth2Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuth2Token")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "[REDACTED]"))
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Exchanges a refresh token for a new access token
pub trait TokenRefresher: Send + Sync {
    fn refresh<'a>(&'a self, refresh_token: &'a str) -> BoxFuture<'a, Result<OAuth2Token>>;
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    refresh_token: Option<String>,
}

/// reqwest client for the eBay identity endpoint
#[derive(Clone)]
pub struct IdentityClient {
    client: Client,
    base_url: String,
    app_id: String,
    cert_id: String,
}

impl IdentityClient {
    /// Identity client for the production or sandbox environment
    pub fn new(config: &EbayConfig) -> Result<Self> {
        let base = if config.sandbox { REST_API_SANDBOX_BASE } else { REST_API_BASE };
        Self::with_base_url(base, config)
    }

    /// Identity client with custom base URL (for testing)
    pub fn with_base_url(base_url: &str, config: &EbayConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(crate::transport::DEFAULT_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            app_id: config.app_id.clone(),
            cert_id: config.cert_id.clone(),
        })
    }

    async fn exchange(&self, refresh_token: &str) -> Result<OAuth2Token> {
        let url = format!("{}{}", self.base_url, TOKEN_PATH);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.app_id, Some(&self.cert_id))
            .form(&[("grant_type", "refresh_token"), ("refresh_token", refresh_token)])
            .send()
            .await
            .map_err(|e| EbayError::Refresh(format!("identity request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EbayError::Refresh(format!("HTTP {} from identity endpoint: {}", status, body)));
        }

        let parsed: TokenResponse = response
            .json()
            .await
            .map_err(|e| EbayError::Refresh(format!("unparsable token response: {}", e)))?;

        Ok(OAuth2Token {
            access_token: parsed.access_token,
            refresh_token: parsed.refresh_token,
            expires_at: parsed.expires_in.map(|secs| Utc::now() + Duration::seconds(secs)),
        })
    }
}

impl TokenRefresher for IdentityClient {
    fn refresh<'a>(&'a self, refresh_token: &'a str) -> BoxFuture<'a, Result<OAuth2Token>> {
        Box::pin(self.exchange(refresh_token))
    }
}

/// OAuth2 token store
///
/// The stored token is only replaced by [`OAuth2::set_token`] and
/// [`OAuth2::refresh_auth_token`].
pub struct OAuth2 {
    token: RwLock<Option<OAuth2Token>>,
    refresher: Option<Arc<dyn TokenRefresher>>,
}

impl OAuth2 {
    pub fn new(token: Option<OAuth2Token>, refresher: Option<Arc<dyn TokenRefresher>>) -> Self {
        Self { token: RwLock::new(token), refresher }
    }

    /// Current access token, if any
    pub async fn access_token(&self) -> Option<String> {
        self.token.read().await.as_ref().map(|t| t.access_token.clone())
    }

    pub async fn token(&self) -> Option<OAuth2Token> {
        self.token.read().await.clone()
    }

    pub async fn set_token(&self, token: OAuth2Token) {
        *self.token.write().await = Some(token);
    }

    /// Exchange the stored refresh token for a new access token
    pub async fn refresh_auth_token(&self) -> Result<()> {
        let refresher = self
            .refresher
            .as_ref()
            .ok_or_else(|| EbayError::Refresh("no token refresher configured".to_string()))?;

        let refresh_token = self
            .token
            .read()
            .await
            .as_ref()
            .and_then(|t| t.refresh_token.clone())
            .ok_or_else(|| EbayError::Refresh("no refresh token available".to_string()))?;

        let mut fresh = refresher.refresh(&refresh_token).await?;
        if fresh.refresh_token.is_none() {
            fresh.refresh_token = Some(refresh_token);
        }

        *self.token.write().await = Some(fresh);
        info!("OAuth2 access token refreshed");
        Ok(())
    }
}
