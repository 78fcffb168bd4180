//! Credential state shared by all services
//!
//! # Auth'n'Auth vs OAuth2
//! - Auth'n'Auth: legacy `eBayAuthToken`, travels inside the XML body
//!   (`RequesterCredentials`), never as a header
//! - OAuth2: user access token (IAF token), travels as a header and can be
//!   refreshed
//!
//! At most one of the two is attached to an outbound request.
//!
//! # Source
//! - https://developer.ebay.com/api-docs/static/oauth-trad-apis.html

pub mod oauth2;

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::EbayConfig;
use crate::error::Result;
pub use oauth2::{IdentityClient, OAuth2, OAuth2Token, TokenRefresher};

/// Point-in-time copy of both tokens
#[derive(Clone, Default, PartialEq, Eq)]
pub struct CredentialSnapshot {
    pub auth_token: Option<String>,
    pub access_token: Option<String>,
}

impl std::fmt::Debug for CredentialSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialSnapshot")
            .field("auth_token", &self.auth_token.as_ref().map(|_| "[REDACTED]"))
            .field("access_token", &self.access_token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Process-wide credential holder
pub struct Auth {
    auth_token: RwLock<Option<String>>,
    pub oauth2: OAuth2,
}

impl Auth {
    pub fn new(auth_token: Option<String>, oauth2: OAuth2) -> Self {
        Self { auth_token: RwLock::new(auth_token), oauth2 }
    }

    /// Build from configuration, refreshing through the eBay identity endpoint
    pub fn from_config(config: &EbayConfig) -> Result<Self> {
        let refresher: Arc<dyn TokenRefresher> = Arc::new(IdentityClient::new(config)?);
        Ok(Self::with_refresher(config, refresher))
    }

    /// Build from configuration with a custom refresher
    pub fn with_refresher(config: &EbayConfig, refresher: Arc<dyn TokenRefresher>) -> Self {
        let token = match (&config.access_token, &config.refresh_token) {
            (Some(access), refresh) => Some(OAuth2Token {
                access_token: access.clone(),
                refresh_token: refresh.clone(),
                expires_at: None,
            }),
            // A refresh token alone is kept with an empty access token so the
            // first refresh can mint one.
            (None, Some(refresh)) => {
                Some(OAuth2Token::new(String::new()).with_refresh_token(refresh.clone()))
            }
            (None, None) => None,
        };
        Self::new(config.auth_token.clone(), OAuth2::new(token, Some(refresher)))
    }

    pub async fn auth_token(&self) -> Option<String> {
        self.auth_token.read().await.clone()
    }

    pub async fn set_auth_token(&self, token: Option<String>) {
        *self.auth_token.write().await = token;
    }

    /// Copy of the current tokens; empty strings count as absent
    pub async fn snapshot(&self) -> CredentialSnapshot {
        CredentialSnapshot {
            auth_token: self.auth_token().await.filter(|t| !t.is_empty()),
            access_token: self.oauth2.access_token().await.filter(|t| !t.is_empty()),
        }
    }
}
