#![allow(dead_code)]

use ebay_adapter::auth::{Auth, OAuth2, OAuth2Token, TokenRefresher};
use ebay_adapter::error::IAF_TOKEN_EXPIRED_CODE;
use ebay_adapter::traditional::Traditional;
use ebay_adapter::transport::Transport;
use ebay_adapter::{EbayConfig, EbayError, Fields, HttpRequest, HttpResponse, Result};
use futures::future::BoxFuture;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Transport answering from a script and recording every request
#[derive(Default)]
pub struct ScriptedTransport {
    script: Mutex<VecDeque<Result<HttpResponse>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn new(script: Vec<Result<HttpResponse>>) -> Arc<Self> {
        Arc::new(Self { script: Mutex::new(script.into()), requests: Mutex::new(Vec::new()) })
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn sent(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl Transport for ScriptedTransport {
    fn send(&self, request: HttpRequest) -> BoxFuture<'_, Result<HttpResponse>> {
        self.requests.lock().unwrap().push(request);
        let next = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(HttpResponse::new(200, success_body())));
        Box::pin(async move { next })
    }
}

/// Refresher handing out a fixed access token (or failing)
pub struct StaticRefresher {
    next_token: Option<String>,
    calls: AtomicUsize,
}

impl StaticRefresher {
    pub fn issuing(token: &str) -> Arc<Self> {
        Arc::new(Self { next_token: Some(token.to_string()), calls: AtomicUsize::new(0) })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self { next_token: None, calls: AtomicUsize::new(0) })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TokenRefresher for StaticRefresher {
    fn refresh<'a>(&'a self, _refresh_token: &'a str) -> BoxFuture<'a, Result<OAuth2Token>> {
        Box::pin(async move {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.next_token {
                Some(token) => Ok(OAuth2Token::new(token.clone())),
                None => Err(EbayError::Refresh("invalid_grant".to_string())),
            }
        })
    }
}

pub fn success_body() -> String {
    "<GetItemResponse xmlns=\"urn:ebay:apis:eBLBaseComponents\"><Ack>Success</Ack></GetItemResponse>".to_string()
}

pub fn failure_body(code: i64, message: &str) -> String {
    format!(
        "<GetItemResponse><Ack>Failure</Ack><Errors><ShortMessage>{m}</ShortMessage>\
         <LongMessage>{m}</LongMessage><ErrorCode>{c}</ErrorCode>\
         <SeverityCode>Error</SeverityCode></Errors></GetItemResponse>",
        m = message,
        c = code
    )
}

pub fn expired() -> Result<HttpResponse> {
    Ok(HttpResponse::new(200, failure_body(IAF_TOKEN_EXPIRED_CODE, "IAF token supplied is expired.")))
}

pub fn ok(body: &str) -> Result<HttpResponse> {
    Ok(HttpResponse::new(200, body))
}

pub fn full_config() -> EbayConfig {
    let mut config = EbayConfig::new("app-id", "cert-id");
    config.dev_id = Some("dev-id".to_string());
    config.site_id = Some(0);
    config
}

pub fn fields(value: Value) -> Fields {
    match value {
        Value::Object(map) => map,
        _ => panic!("fields must be an object"),
    }
}

pub struct Harness {
    pub gateway: Traditional,
    pub transport: Arc<ScriptedTransport>,
    pub refresher: Arc<StaticRefresher>,
}

/// Gateway over a scripted transport with the given tokens
pub fn harness(
    config: EbayConfig,
    auth_token: Option<&str>,
    access_token: Option<&str>,
    refresher: Arc<StaticRefresher>,
    script: Vec<Result<HttpResponse>>,
) -> Harness {
    let token = access_token.map(|t| OAuth2Token::new(t).with_refresh_token("refresh-token"));
    let oauth2 = OAuth2::new(token, Some(refresher.clone()));
    let auth = Arc::new(Auth::new(auth_token.map(str::to_string), oauth2));
    let transport = ScriptedTransport::new(script);
    let gateway = Traditional::new(Arc::new(config), auth, transport.clone());
    Harness { gateway, transport, refresher }
}
