#![cfg(feature = "restful")]

use ebay_adapter::auth::{Auth, OAuth2, OAuth2Token};
use ebay_adapter::restful::analytics::ANALYTICS_BASE_PATH;
use ebay_adapter::restful::feed::FEED_BASE_PATH;
use ebay_adapter::restful::{Analytics, Feed, FeedParams, RestfulApi};
use ebay_adapter::transport::{ReqwestTransport, Transport};
use ebay_adapter::EbayConfig;
use std::sync::Arc;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config() -> EbayConfig {
    let mut config = EbayConfig::new("app-id", "cert-id");
    config.site_id = Some(0);
    config
}

#[tokio::test]
async fn test_feed_sends_marketplace_range_and_bearer() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/buy/feed/v1_beta/item_snapshot"))
        .and(query_param("category_id", "15032"))
        .and(query_param("snapshot_date", "2026-10-15T07:00:00.000Z"))
        .and(header("X-EBAY-C-MARKETPLACE-ID", "EBAY_US"))
        .and(header("Range", "bytes=0-10485760"))
        .and(header("Authorization", "Bearer app-token"))
        .respond_with(ResponseTemplate::new(206).set_body_bytes(vec![0x1f, 0x8b, 0x08]))
        .expect(1)
        .mount(&server)
        .await;

    let auth = Arc::new(Auth::new(None, OAuth2::new(Some(OAuth2Token::new("app-token")), None)));
    let transport: Arc<dyn Transport> = Arc::new(ReqwestTransport::new().unwrap());
    let feed = Feed::with_api(RestfulApi::with_base_url(
        &server.uri(),
        FEED_BASE_PATH,
        auth,
        transport,
    ));

    let params = FeedParams {
        feed_scope: "ALL_ACTIVE".to_string(),
        category_id: "15032".to_string(),
        date: None,
    };
    let response = feed
        .get_item_snapshot_feed(&params, "2026-10-15T07:00:00.000Z", "EBAY_US", "bytes=0-10485760")
        .await
        .unwrap();

    assert_eq!(response.status, 206);
    assert_eq!(response.body, vec![0x1f, 0x8b, 0x08]);
}

#[tokio::test]
async fn test_analytics_rate_limits_and_error_mapping() {
    let server = MockServer::start().await;
    let config = config();

    Mock::given(method("GET"))
        .and(path("/developer/analytics/v1_beta/rate_limit/"))
        .and(query_param("api_name", "TradingAPI"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "rateLimits": [{"apiContext": "TradAPI", "apiName": "TradingAPI"}]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/developer/analytics/v1_beta/user_rate_limit/"))
        .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
            "errors": [{"errorId": 1100, "category": "REQUEST", "message": "Access denied"}]
        })))
        .mount(&server)
        .await;

    let auth = Arc::new(Auth::from_config(&config).unwrap());
    let transport: Arc<dyn Transport> = Arc::new(ReqwestTransport::new().unwrap());
    let analytics = Analytics::with_api(RestfulApi::with_base_url(
        &server.uri(),
        ANALYTICS_BASE_PATH,
        auth,
        transport,
    ));

    let limits = analytics.get_rate_limits(None, Some("TradingAPI")).await.unwrap();
    assert_eq!(limits["rateLimits"][0]["apiName"], "TradingAPI");

    let err = analytics.get_user_rate_limits(None, None).await.unwrap_err();
    assert_eq!(err.code(), Some(1100));
}
