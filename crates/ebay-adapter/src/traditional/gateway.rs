//! Traditional API gateway
//!
//! Builds one [`TraditionalService`] per legacy API. Prerequisites are
//! checked while building, so a misconfigured API fails before any call
//! can be made.

use std::sync::Arc;
use tracing::debug;

use crate::auth::Auth;
use crate::config::EbayConfig;
use crate::error::Result;
use crate::transport::{ReqwestTransport, Transport};
use crate::types::{CallOptions, Fields, HttpResponse};

use super::api::TargetApi;
use super::calls::CallRegistry;
use super::dispatcher::{Collaborators, Dispatcher};
use super::request::RequestBuilder;
use super::xml::{EnvelopeBuilder, ErrorClassifier, IafTokenExpired, ResponseParser, XmlEnvelope, XmlResponseParser};

/// Factory for Trading, Shopping, Finding and Client Alerts services
#[derive(Clone)]
pub struct Traditional {
    config: Arc<EbayConfig>,
    auth: Arc<Auth>,
    collaborators: Collaborators,
}

impl Traditional {
    /// Gateway with the default XML collaborators over `transport`
    pub fn new(config: Arc<EbayConfig>, auth: Arc<Auth>, transport: Arc<dyn Transport>) -> Self {
        Self {
            config,
            auth,
            collaborators: Collaborators {
                transport,
                envelope: Arc::new(XmlEnvelope),
                parser: Arc::new(XmlResponseParser),
                classifier: Arc::new(IafTokenExpired),
            },
        }
    }

    /// Gateway over reqwest, refreshing through the eBay identity endpoint
    pub fn from_config(config: EbayConfig) -> Result<Self> {
        let auth = Arc::new(Auth::from_config(&config)?);
        let transport: Arc<dyn Transport> = Arc::new(ReqwestTransport::new()?);
        Ok(Self::new(Arc::new(config), auth, transport))
    }

    pub fn with_envelope_builder(mut self, envelope: Arc<dyn EnvelopeBuilder>) -> Self {
        self.collaborators.envelope = envelope;
        self
    }

    pub fn with_response_parser(mut self, parser: Arc<dyn ResponseParser>) -> Self {
        self.collaborators.parser = parser;
        self
    }

    pub fn with_error_classifier(mut self, classifier: Arc<dyn ErrorClassifier>) -> Self {
        self.collaborators.classifier = classifier;
        self
    }

    pub fn config(&self) -> &EbayConfig {
        &self.config
    }

    pub fn auth(&self) -> &Arc<Auth> {
        &self.auth
    }

    /// Trading API (requires `dev_id` and `site_id`)
    pub fn create_trading_api(&self) -> Result<TraditionalService> {
        self.create_service(TargetApi::trading(&self.config)?)
    }

    /// Shopping API (requires `site_id`)
    pub fn create_shopping_api(&self) -> Result<TraditionalService> {
        self.create_service(TargetApi::shopping(&self.config)?)
    }

    pub fn create_finding_api(&self) -> Result<TraditionalService> {
        self.create_service(TargetApi::finding(&self.config)?)
    }

    /// Client Alerts API (requires `site_id`)
    pub fn create_client_alerts_api(&self) -> Result<TraditionalService> {
        self.create_service(TargetApi::client_alerts(&self.config)?)
    }

    /// Service for an already validated descriptor
    pub fn create_service(&self, api: TargetApi) -> Result<TraditionalService> {
        // Surface a missing endpoint variant now rather than on first call
        api.endpoint.select(self.config.sandbox)?;

        debug!("Building {} service ({} calls)", api.name, api.calls.calls().len());
        let registry = api.calls;
        let builder = RequestBuilder::new(api, self.config.sandbox);
        let dispatcher = Dispatcher::new(
            builder,
            self.auth.clone(),
            self.collaborators.clone(),
            self.config.auto_refresh_token,
        );
        Ok(TraditionalService { registry, dispatcher })
    }
}

/// Callable service for one legacy API
pub struct TraditionalService {
    registry: CallRegistry,
    dispatcher: Dispatcher,
}

impl TraditionalService {
    pub fn api_name(&self) -> &'static str {
        self.registry.api()
    }

    /// Registered call names
    pub fn calls(&self) -> &'static [&'static str] {
        self.registry.calls()
    }

    pub fn supports(&self, call_name: &str) -> bool {
        self.registry.contains(call_name)
    }

    /// Invoke a registered call
    ///
    /// Unregistered names fail with `UnsupportedCall` before anything is sent.
    pub async fn call(&self, call_name: &str, fields: Fields, options: CallOptions) -> Result<HttpResponse> {
        let call_name = self.registry.resolve(call_name)?;
        self.dispatcher.invoke(call_name, &fields, &options).await
    }

    /// [`TraditionalService::call`] with default options
    pub async fn execute(&self, call_name: &str, fields: Fields) -> Result<HttpResponse> {
        self.call(call_name, fields, CallOptions::default()).await
    }
}
