//! HTTP transport
//!
//! The gateway talks to the network only through [`Transport`]. The default
//! implementation is backed by reqwest; tests substitute an in-memory one.
//!
//! A transport returns every HTTP response, whatever its status. Deciding
//! whether a response is a failure is left to the response parser, because
//! eBay reports most errors inside 200 responses.

use futures::future::BoxFuture;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use crate::error::Result;
use crate::types::{HttpMethod, HttpRequest, HttpResponse};

/// Default request timeout
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Network transport used by the gateway and the REST wrappers
pub trait Transport: Send + Sync {
    fn send(&self, request: HttpRequest) -> BoxFuture<'_, Result<HttpResponse>>;
}

/// reqwest-backed transport
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a transport with the default timeout
    pub fn new() -> Result<Self> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        debug!("{} {}", request.method.as_str(), request.url);

        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
        };

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if !request.params.is_empty() {
            builder = builder.query(&request.params);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;

        debug!("HTTP {} ({} bytes) for {}", status, body.len(), request.url);
        Ok(HttpResponse { status, body: body.to_vec() })
    }
}

impl Transport for ReqwestTransport {
    fn send(&self, request: HttpRequest) -> BoxFuture<'_, Result<HttpResponse>> {
        Box::pin(self.execute(request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_transport_creation() {
        assert!(ReqwestTransport::new().is_ok());
    }

    #[tokio::test]
    async fn test_post_sends_headers_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/ws/api.dll"))
            .and(header("X-EBAY-API-CALL-NAME", "GetItem"))
            .and(body_string("<xml/>"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<ok/>"))
            .expect(1)
            .mount(&server)
            .await;

        let transport = ReqwestTransport::new().unwrap();
        let request = HttpRequest::post(format!("{}/ws/api.dll", server.uri()))
            .with_header("X-EBAY-API-CALL-NAME", "GetItem")
            .with_body("<xml/>");

        let response = transport.send(request).await.unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.text(), "<ok/>");
    }

    #[tokio::test]
    async fn test_non_success_status_is_returned_not_raised() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .and(query_param("a", "1"))
            .respond_with(ResponseTemplate::new(404).set_body_string("nope"))
            .mount(&server)
            .await;

        let transport = ReqwestTransport::new().unwrap();
        let request = HttpRequest::get(format!("{}/missing", server.uri())).with_param("a", "1");

        let response = transport.send(request).await.unwrap();
        assert_eq!(response.status, 404);
        assert!(!response.is_success());
    }
}
