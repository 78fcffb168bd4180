//! Dispatch with one-shot token refresh
//!
//! # State Machine
//! Built -> Sent -> Succeeded
//! Sent -> AuthExpired -> Refreshing -> Retrying -> Sent -> Succeeded | Failed
//! Sent -> Failed (any other error, or AuthExpired with auto refresh off)
//!
//! The AuthExpired transition fires at most once per invocation. A second
//! expired-token answer after the retry is returned to the caller.

use std::sync::Arc;
use tracing::{debug, warn};

use crate::auth::Auth;
use crate::error::Result;
use crate::transport::Transport;
use crate::types::{CallOptions, Fields, HttpResponse};

use super::request::RequestBuilder;
use super::xml::{EnvelopeBuilder, ErrorClassifier, ResponseParser};

/// Collaborators shared by every service of a gateway
#[derive(Clone)]
pub struct Collaborators {
    pub transport: Arc<dyn Transport>,
    pub envelope: Arc<dyn EnvelopeBuilder>,
    pub parser: Arc<dyn ResponseParser>,
    pub classifier: Arc<dyn ErrorClassifier>,
}

/// Sends calls of one target API
pub struct Dispatcher {
    builder: RequestBuilder,
    auth: Arc<Auth>,
    collaborators: Collaborators,
    auto_refresh_token: bool,
}

impl Dispatcher {
    pub fn new(
        builder: RequestBuilder,
        auth: Arc<Auth>,
        collaborators: Collaborators,
        auto_refresh_token: bool,
    ) -> Self {
        Self { builder, auth, collaborators, auto_refresh_token }
    }

    /// Send a call, refreshing the OAuth token and retrying once if eBay
    /// reports it expired
    pub async fn invoke(
        &self,
        call_name: &str,
        fields: &Fields,
        options: &CallOptions,
    ) -> Result<HttpResponse> {
        match self.attempt(call_name, fields, options).await {
            Err(err) if self.collaborators.classifier.is_auth_expired(&err) => {
                if !self.auto_refresh_token {
                    return Err(err);
                }
                warn!(
                    "{} {}: access token expired, refreshing and retrying once",
                    self.builder.api().name,
                    call_name
                );
                self.auth.oauth2.refresh_auth_token().await?;
                self.attempt(call_name, fields, options).await
            }
            other => other,
        }
    }

    /// Build from current credentials, send, and classify the response
    async fn attempt(
        &self,
        call_name: &str,
        fields: &Fields,
        options: &CallOptions,
    ) -> Result<HttpResponse> {
        let credentials = self.auth.snapshot().await;
        let config = self.builder.build(call_name, fields, options, &credentials)?;
        let request = self.builder.to_http_request(&config, self.collaborators.envelope.as_ref())?;

        debug!("{} {} -> {}", self.builder.api().name, call_name, config.endpoint);
        let response = self.collaborators.transport.send(request).await?;
        self.collaborators.parser.parse(response)
    }
}
