//! Shared utilities for integration tests.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use axum::{
    body::Bytes,
    extract::Query,
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Router,
};
use gemini_gateway::config::{ApiKey, GatewayConfig};
use gemini_gateway::http::HttpServer;
use gemini_gateway::lifecycle::Shutdown;
use serde_json::Value;
use tokio::net::TcpListener;

/// One request as seen by the stub upstream.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct Recorded {
    pub path: String,
    pub query: HashMap<String, String>,
    pub content_type: Option<String>,
    pub body: Value,
}

/// A running stub of the generative API.
pub struct StubUpstream {
    pub addr: SocketAddr,
    calls: Arc<AtomicU32>,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

#[allow(dead_code)]
impl StubUpstream {
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    /// Base URL to put in `upstream.base_url`.
    pub fn base_url(&self) -> String {
        format!("http://{}/v1beta", self.addr)
    }
}

/// Start a stub upstream. `respond` gets the 0-based call index and the
/// parsed request body and returns a status and raw response body.
pub async fn start_stub_upstream<F>(respond: F) -> StubUpstream
where
    F: Fn(u32, &Value) -> (u16, String) + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let calls = Arc::new(AtomicU32::new(0));
    let requests = Arc::new(Mutex::new(Vec::new()));
    let respond = Arc::new(respond);

    let handler = {
        let calls = calls.clone();
        let requests = requests.clone();
        move |uri: axum::http::Uri,
              Query(query): Query<HashMap<String, String>>,
              headers: HeaderMap,
              body: Bytes| {
            let calls = calls.clone();
            let requests = requests.clone();
            let respond = respond.clone();
            async move {
                let index = calls.fetch_add(1, Ordering::SeqCst);
                let body: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
                requests.lock().unwrap().push(Recorded {
                    path: uri.path().to_string(),
                    query,
                    content_type: headers
                        .get(header::CONTENT_TYPE)
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_string),
                    body: body.clone(),
                });

                let (status, response) = respond(index, &body);
                (
                    StatusCode::from_u16(status).unwrap(),
                    [(header::CONTENT_TYPE, "application/json")],
                    response,
                )
                    .into_response()
            }
        }
    };

    let app = Router::new().fallback(handler);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    StubUpstream {
        addr,
        calls,
        requests,
    }
}

/// Gateway config aimed at `stub`, with short backoff.
#[allow(dead_code)]
pub fn config_for(stub: &StubUpstream) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.upstream.base_url = stub.base_url();
    config.upstream.model = "gemini-test".into();
    config.retries.base_delay_ms = 10;
    config
}

/// Start the gateway on an ephemeral port.
pub async fn start_gateway(config: GatewayConfig, key: Option<&str>) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.signal();
    let server = HttpServer::new(config, key.and_then(ApiKey::new));
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

/// Body of a successful upstream reply carrying `text`.
#[allow(dead_code)]
pub fn candidate_body(text: &str) -> String {
    serde_json::json!({
        "candidates": [{ "content": { "parts": [{ "text": text }], "role": "model" } }]
    })
    .to_string()
}
