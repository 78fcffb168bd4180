//! eBay API Adapter
//!
//! - `traditional`: Trading, Shopping, Finding and Client Alerts behind one
//!   calling convention (`service.call(name, fields, options)`), with
//!   endpoint selection, auth header composition and one-shot OAuth refresh
//! - `restful`: Buy Feed and Developer Analytics REST wrappers
//! - `auth`: Auth'n'Auth token and OAuth2 token store/refresh
//!
//! # Official Documentation
//! - Traditional APIs: https://developer.ebay.com/develop/traditional-apis
//! - OAuth with traditional APIs: https://developer.ebay.com/api-docs/static/oauth-trad-apis.html
//! - Buy Feed: https://developer.ebay.com/api-docs/buy/feed/overview.html
//! - Analytics: https://developer.ebay.com/api-docs/developer/analytics/overview.html

pub mod auth;
pub mod config;
pub mod error;
pub mod traditional;
pub mod transport;
pub mod types;

#[cfg(feature = "restful")]
pub mod restful;

pub use config::EbayConfig;
pub use error::{EbayError, Result};
pub use types::*;

/// REST API base URL (also hosts the identity endpoint)
pub const REST_API_BASE: &str = "https://api.ebay.com";

/// Sandbox REST API base URL
pub const REST_API_SANDBOX_BASE: &str = "https://api.sandbox.ebay.com";
