//! Buy Feed API
//!
//! Downloads TSV_GZIP feed files of items for a category, date and
//! marketplace. Files are large; callers page through them with the
//! `Range` header (`bytes=startpos-endpos`).
//!
//! # Endpoints
//! - GET /item
//! - GET /item_group
//! - GET /item_snapshot
//! - GET /product
//!
//! # Source
//! - https://developer.ebay.com/api-docs/buy/feed/resources/methods

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::RestfulApi;
use crate::auth::Auth;
use crate::config::EbayConfig;
use crate::error::Result;
use crate::transport::Transport;
use crate::types::{Headers, HttpResponse};

pub const FEED_BASE_PATH: &str = "/buy/feed/v1_beta";

/// Common feed filters
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct FeedParams {
    /// `NEWLY_LISTED` or `ALL_ACTIVE`
    pub feed_scope: String,
    pub category_id: String,
    /// `yyyyMMdd`, required for `NEWLY_LISTED`
    #[serde(default)]
    pub date: Option<String>,
}

/// Buy Feed API client
#[derive(Clone)]
pub struct Feed {
    api: RestfulApi,
}

impl Feed {
    pub fn new(config: &EbayConfig, auth: Arc<Auth>, transport: Arc<dyn Transport>) -> Self {
        Self { api: RestfulApi::new(config, FEED_BASE_PATH, auth, transport) }
    }

    pub fn with_api(api: RestfulApi) -> Self {
        Self { api }
    }

    /// TSV_GZIP item feed file
    pub async fn get_item_feed(&self, params: &FeedParams, marketplace_id: &str, range: &str) -> Result<HttpResponse> {
        self.get("/item", params, None, marketplace_id, range).await
    }

    /// TSV_GZIP item group feed file
    pub async fn get_item_group_feed(
        &self,
        params: &FeedParams,
        marketplace_id: &str,
        range: &str,
    ) -> Result<HttpResponse> {
        self.get("/item_group", params, None, marketplace_id, range).await
    }

    /// Hourly snapshot of items changed within the hour of `snapshot_date`
    pub async fn get_item_snapshot_feed(
        &self,
        params: &FeedParams,
        snapshot_date: &str,
        marketplace_id: &str,
        range: &str,
    ) -> Result<HttpResponse> {
        self.get("/item_snapshot", params, Some(snapshot_date), marketplace_id, range).await
    }

    pub async fn get_product_feed(
        &self,
        params: &FeedParams,
        snapshot_date: &str,
        marketplace_id: &str,
        range: &str,
    ) -> Result<HttpResponse> {
        self.get("/product", params, Some(snapshot_date), marketplace_id, range).await
    }

    async fn get(
        &self,
        path: &str,
        params: &FeedParams,
        snapshot_date: Option<&str>,
        marketplace_id: &str,
        range: &str,
    ) -> Result<HttpResponse> {
        let mut headers = Headers::new();
        headers.insert("X-EBAY-C-MARKETPLACE-ID".to_string(), marketplace_id.to_string());
        headers.insert("Range".to_string(), range.to_string());

        let query = [
            ("feed_scope", Some(params.feed_scope.as_str())),
            ("category_id", Some(params.category_id.as_str())),
            ("date", params.date.as_deref()),
            ("snapshot_date", snapshot_date),
        ];
        self.api.get(path, &query, headers).await
    }
}
