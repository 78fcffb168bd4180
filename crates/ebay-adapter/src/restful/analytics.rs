//! Developer Analytics API
//!
//! Call limit and utilization data for an application or user.
//!
//! # Endpoints
//! - GET /rate_limit/
//! - GET /user_rate_limit/

use serde_json::Value;
use std::sync::Arc;

use super::RestfulApi;
use crate::auth::Auth;
use crate::config::EbayConfig;
use crate::error::Result;
use crate::transport::Transport;
use crate::types::Headers;

pub const ANALYTICS_BASE_PATH: &str = "/developer/analytics/v1_beta";

#[derive(Clone)]
pub struct Analytics {
    api: RestfulApi,
}

impl Analytics {
    pub fn new(config: &EbayConfig, auth: Arc<Auth>, transport: Arc<dyn Transport>) -> Self {
        Self { api: RestfulApi::new(config, ANALYTICS_BASE_PATH, auth, transport) }
    }

    pub fn with_api(api: RestfulApi) -> Self {
        Self { api }
    }

    /// Application rate limits, optionally filtered by API context and name
    pub async fn get_rate_limits(&self, api_context: Option<&str>, api_name: Option<&str>) -> Result<Value> {
        self.get("/rate_limit/", api_context, api_name).await
    }

    /// Rate limits of the user behind the access token
    pub async fn get_user_rate_limits(
        &self,
        api_context: Option<&str>,
        api_name: Option<&str>,
    ) -> Result<Value> {
        self.get("/user_rate_limit/", api_context, api_name).await
    }

    async fn get(&self, path: &str, api_context: Option<&str>, api_name: Option<&str>) -> Result<Value> {
        let query = [("api_context", api_context), ("api_name", api_name)];
        self.api.get(path, &query, Headers::new()).await?.json()
    }
}
