//! Target API descriptors
//!
//! One [`TargetApi`] per legacy eBay API. A descriptor is built once, when its
//! service is created, and never changes afterwards. Prerequisite checks on
//! the configuration happen here, so a misconfigured API can never be built.
//!
//! # Source
//! - Trading: https://developer.ebay.com/devzone/xml/docs/reference/ebay/index.html
//! - Shopping: https://developer.ebay.com/devzone/shopping/docs/callref/index.html
//! - Finding: https://developer.ebay.com/devzone/finding/callref/index.html
//! - Client Alerts: https://developer.ebay.com/devzone/client-alerts/docs/callref/index.html

use crate::config::EbayConfig;
use crate::error::{EbayError, Result};
use crate::types::Headers;

use super::calls::{CallRegistry, CLIENT_ALERTS_CALLS, FINDING_CALLS, SHOPPING_CALLS, TRADING_CALLS};

pub const TRADING_ENDPOINT: &str = "https://api.ebay.com/ws/api.dll";
pub const TRADING_SANDBOX_ENDPOINT: &str = "https://api.sandbox.ebay.com/ws/api.dll";
pub const SHOPPING_ENDPOINT: &str = "http://open.api.ebay.com/shopping";
pub const SHOPPING_SANDBOX_ENDPOINT: &str = "http://open.api.sandbox.ebay.com/shopping";
pub const FINDING_ENDPOINT: &str = "https://svcs.ebay.com/services/search/FindingService/v1";
pub const FINDING_SANDBOX_ENDPOINT: &str =
    "https://svcs.sandbox.ebay.com/services/search/FindingService/v1";
pub const CLIENT_ALERTS_ENDPOINT: &str = "https://clientalerts.ebay.com/ws/ecasvc/ClientAlerts";
pub const CLIENT_ALERTS_SANDBOX_ENDPOINT: &str =
    "https://clientalerts.sandbox.ebay.com/ws/ecasvc/ClientAlerts";

/// Namespace shared by Trading and Shopping
pub const EBL_BASE_COMPONENTS_NS: &str = "urn:ebay:apis:eBLBaseComponents";
pub const FINDING_NS: &str = "http://www.ebay.com/marketplace/search/v1/services";

pub const TRADING_COMPATIBILITY_LEVEL: u32 = 967;
pub const SHOPPING_VERSION: u32 = 863;
pub const CLIENT_ALERTS_VERSION: u32 = 643;

// ============================================================================
// Endpoint selection
// ============================================================================

/// Production / sandbox URL pair
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoint {
    pub production: Option<String>,
    pub sandbox: Option<String>,
}

impl Endpoint {
    pub fn new(production: &str, sandbox: &str) -> Self {
        Self { production: Some(production.to_string()), sandbox: Some(sandbox.to_string()) }
    }

    /// URL for the requested environment
    pub fn select(&self, sandbox: bool) -> Result<&str> {
        let (url, variant) = if sandbox {
            (self.sandbox.as_deref(), "sandbox")
        } else {
            (self.production.as_deref(), "production")
        };
        url.filter(|u| !u.is_empty())
            .ok_or_else(|| EbayError::Configuration(format!("no {} endpoint configured", variant)))
    }
}

// ============================================================================
// Header schemes
// ============================================================================

/// Per-API header computation
///
/// Each variant captures the configuration values it needs, so computing the
/// headers is a pure function of call name and optional bearer token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HeaderScheme {
    Trading { app_id: String, cert_id: String, dev_id: String, site_id: i32 },
    Shopping { app_id: String, site_id: i32 },
    Finding { app_id: String },
    /// Client Alerts authenticates through query parameters
    None,
}

impl HeaderScheme {
    pub fn headers(&self, call_name: &str, access_token: Option<&str>) -> Headers {
        let mut headers = Headers::new();
        let mut put = |name: &str, value: String| {
            headers.insert(name.to_string(), value);
        };

        match self {
            HeaderScheme::Trading { app_id, cert_id, dev_id, site_id } => {
                put("X-EBAY-API-CALL-NAME", call_name.to_string());
                put("X-EBAY-API-CERT-NAME", cert_id.clone());
                put("X-EBAY-API-APP-NAME", app_id.clone());
                put("X-EBAY-API-DEV-NAME", dev_id.clone());
                put("X-EBAY-API-SITEID", site_id.to_string());
                put("X-EBAY-API-COMPATIBILITY-LEVEL", TRADING_COMPATIBILITY_LEVEL.to_string());
                if let Some(token) = access_token {
                    put("X-EBAY-API-IAF-TOKEN", token.to_string());
                }
            }
            HeaderScheme::Shopping { app_id, site_id } => {
                put("X-EBAY-API-CALL-NAME", call_name.to_string());
                put("X-EBAY-API-APP-ID", app_id.clone());
                put("X-EBAY-API-SITE-ID", site_id.to_string());
                put("X-EBAY-API-VERSION", SHOPPING_VERSION.to_string());
                put("X-EBAY-API-REQUEST-ENCODING", "xml".to_string());
            }
            HeaderScheme::Finding { app_id } => {
                put("X-EBAY-SOA-SECURITY-APPNAME", app_id.clone());
                put("X-EBAY-SOA-OPERATION-NAME", call_name.to_string());
            }
            HeaderScheme::None => {}
        }

        headers
    }
}

// ============================================================================
// Descriptor
// ============================================================================

/// How call fields travel to the remote service
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Protocol {
    /// POST of an XML envelope in the given namespace
    Xml { xmlns: &'static str },
    /// GET with fixed query parameters plus the flattened fields
    Query { params: Vec<(String, String)> },
}

/// Identity of one legacy eBay API
#[derive(Clone, Debug)]
pub struct TargetApi {
    pub name: &'static str,
    pub endpoint: Endpoint,
    pub protocol: Protocol,
    pub calls: CallRegistry,
    pub headers: HeaderScheme,
}

/// Any integer is accepted; eBay rejects unknown sites itself
fn require_site_id(config: &EbayConfig, api: &str) -> Result<i32> {
    config
        .site_id
        .ok_or_else(|| EbayError::Configuration(format!("siteId is required for {} API.", api)))
}

impl TargetApi {
    /// Trading API; requires `dev_id` and `site_id`
    pub fn trading(config: &EbayConfig) -> Result<Self> {
        let dev_id = config
            .dev_id()
            .ok_or_else(|| EbayError::Configuration("devId is required for trading API.".to_string()))?;
        let site_id = require_site_id(config, "trading")?;

        Ok(Self {
            name: "Trading",
            endpoint: Endpoint::new(TRADING_ENDPOINT, TRADING_SANDBOX_ENDPOINT),
            protocol: Protocol::Xml { xmlns: EBL_BASE_COMPONENTS_NS },
            calls: CallRegistry::new("Trading", TRADING_CALLS),
            headers: HeaderScheme::Trading {
                app_id: config.app_id.clone(),
                cert_id: config.cert_id.clone(),
                dev_id: dev_id.to_string(),
                site_id,
            },
        })
    }

    /// Shopping API; requires `site_id`
    pub fn shopping(config: &EbayConfig) -> Result<Self> {
        let site_id = require_site_id(config, "shopping")?;

        Ok(Self {
            name: "Shopping",
            endpoint: Endpoint::new(SHOPPING_ENDPOINT, SHOPPING_SANDBOX_ENDPOINT),
            protocol: Protocol::Xml { xmlns: EBL_BASE_COMPONENTS_NS },
            calls: CallRegistry::new("Shopping", SHOPPING_CALLS),
            headers: HeaderScheme::Shopping { app_id: config.app_id.clone(), site_id },
        })
    }

    /// Finding API; no prerequisites beyond the app id
    pub fn finding(config: &EbayConfig) -> Result<Self> {
        Ok(Self {
            name: "Finding",
            endpoint: Endpoint::new(FINDING_ENDPOINT, FINDING_SANDBOX_ENDPOINT),
            protocol: Protocol::Xml { xmlns: FINDING_NS },
            calls: CallRegistry::new("Finding", FINDING_CALLS),
            headers: HeaderScheme::Finding { app_id: config.app_id.clone() },
        })
    }

    /// Client Alerts API; requires `site_id`
    pub fn client_alerts(config: &EbayConfig) -> Result<Self> {
        let site_id = require_site_id(config, "client alerts")?;

        Ok(Self {
            name: "ClientAlerts",
            endpoint: Endpoint::new(CLIENT_ALERTS_ENDPOINT, CLIENT_ALERTS_SANDBOX_ENDPOINT),
            protocol: Protocol::Query {
                params: vec![
                    ("appid".to_string(), config.app_id.clone()),
                    ("siteid".to_string(), site_id.to_string()),
                    ("version".to_string(), CLIENT_ALERTS_VERSION.to_string()),
                ],
            },
            calls: CallRegistry::new("ClientAlerts", CLIENT_ALERTS_CALLS),
            headers: HeaderScheme::None,
        })
    }

    /// Replace both endpoint URLs
    pub fn with_endpoint(mut self, endpoint: Endpoint) -> Self {
        self.endpoint = endpoint;
        self
    }

    /// XML namespace, absent for query-string APIs
    pub fn xmlns(&self) -> Option<&'static str> {
        match self.protocol {
            Protocol::Xml { xmlns } => Some(xmlns),
            Protocol::Query { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_config() -> EbayConfig {
        let mut config = EbayConfig::new("app", "cert");
        config.dev_id = Some("dev".to_string());
        config.site_id = Some(77);
        config
    }

    #[test]
    fn test_endpoint_select() {
        let endpoint = Endpoint::new("https://prod", "https://sandbox");
        assert_eq!(endpoint.select(false).unwrap(), "https://prod");
        assert_eq!(endpoint.select(true).unwrap(), "https://sandbox");
    }

    #[test]
    fn test_endpoint_missing_variant() {
        let endpoint = Endpoint { production: Some("https://prod".to_string()), sandbox: None };
        assert!(matches!(endpoint.select(true), Err(EbayError::Configuration(_))));
    }

    #[test]
    fn test_trading_requires_dev_id() {
        let mut config = full_config();
        config.dev_id = None;
        let err = TargetApi::trading(&config).unwrap_err();
        assert_eq!(err.to_string(), "configuration error: devId is required for trading API.");

        config.dev_id = Some(String::new());
        assert!(TargetApi::trading(&config).is_err());
    }

    #[test]
    fn test_site_id_required() {
        let mut config = full_config();
        config.site_id = None;
        assert!(TargetApi::trading(&config).is_err());
        assert!(TargetApi::shopping(&config).is_err());
        assert!(TargetApi::client_alerts(&config).is_err());
        assert!(TargetApi::finding(&config).is_ok());

        config.site_id = Some(-1);
        assert!(TargetApi::shopping(&config).is_ok());
    }

    #[test]
    fn test_trading_headers_with_iaf_token() {
        let api = TargetApi::trading(&full_config()).unwrap();
        let headers = api.headers.headers("GetItem", Some("bearer"));

        assert_eq!(headers["X-EBAY-API-CALL-NAME"], "GetItem");
        assert_eq!(headers["X-EBAY-API-DEV-NAME"], "dev");
        assert_eq!(headers["X-EBAY-API-SITEID"], "77");
        assert_eq!(headers["X-EBAY-API-COMPATIBILITY-LEVEL"], "967");
        assert_eq!(headers["X-EBAY-API-IAF-TOKEN"], "bearer");

        let without = api.headers.headers("GetItem", None);
        assert!(!without.contains_key("X-EBAY-API-IAF-TOKEN"));
    }

    #[test]
    fn test_shopping_and_finding_headers() {
        let config = full_config();
        let shopping = TargetApi::shopping(&config).unwrap();
        let headers = shopping.headers.headers("GetSingleItem", Some("ignored"));
        assert_eq!(headers["X-EBAY-API-VERSION"], "863");
        assert_eq!(headers["X-EBAY-API-REQUEST-ENCODING"], "xml");
        assert!(!headers.values().any(|v| v == "ignored"));

        let finding = TargetApi::finding(&config).unwrap();
        let headers = finding.headers.headers("findItemsByKeywords", None);
        assert_eq!(headers["X-EBAY-SOA-OPERATION-NAME"], "findItemsByKeywords");
        assert_eq!(headers["X-EBAY-SOA-SECURITY-APPNAME"], "app");
        assert_eq!(finding.xmlns(), Some(FINDING_NS));
    }

    #[test]
    fn test_client_alerts_is_query_protocol() {
        let api = TargetApi::client_alerts(&full_config()).unwrap();
        assert_eq!(api.xmlns(), None);
        assert!(api.headers.headers("GetUserAlerts", Some("t")).is_empty());
        match &api.protocol {
            Protocol::Query { params } => {
                assert!(params.contains(&("version".to_string(), "643".to_string())));
                assert!(params.contains(&("siteid".to_string(), "77".to_string())));
            }
            other => panic!("unexpected protocol {:?}", other),
        }
    }
}
