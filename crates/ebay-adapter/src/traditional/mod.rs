//! Traditional (XML) eBay APIs
//!
//! # Components
//! - `api`: per-API descriptors (endpoints, namespace, header scheme)
//! - `calls`: fixed call registries
//! - `credentials`: Auth'n'Auth vs OAuth token selection
//! - `request`: per-attempt request building
//! - `dispatcher`: send with one-shot refresh and retry
//! - `gateway`: composition root producing one service per API
//!
//! # Usage
//! ```no_run
//! # async fn run() -> ebay_adapter::Result<()> {
//! use ebay_adapter::traditional::Traditional;
//! use ebay_adapter::{CallOptions, EbayConfig, Fields};
//!
//! let gateway = Traditional::from_config(EbayConfig::from_env()?)?;
//! let trading = gateway.create_trading_api()?;
//! let response = trading.call("GeteBayOfficialTime", Fields::new(), CallOptions::default()).await?;
//! println!("{}", response.text());
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod calls;
pub mod credentials;
pub mod dispatcher;
pub mod gateway;
pub mod query;
pub mod request;
pub mod xml;

pub use api::{Endpoint, HeaderScheme, Protocol, TargetApi};
pub use calls::CallRegistry;
pub use dispatcher::{Collaborators, Dispatcher};
pub use gateway::{Traditional, TraditionalService};
pub use request::{RequestBuilder, ResolvedRequestConfig};
pub use xml::{EnvelopeBuilder, ErrorClassifier, IafTokenExpired, ResponseParser, XmlEnvelope, XmlResponseParser};
