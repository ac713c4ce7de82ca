//! Shared utilities for integration tests: mock webhooks and a gateway
//! running on ephemeral ports.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::Value;
use tokio::net::TcpListener;

use chat_gateway::config::GatewayConfig;
use chat_gateway::http::HttpServer;
use chat_gateway::lifecycle::Shutdown;

/// One call observed by a recording webhook.
#[derive(Debug, Clone)]
pub struct Received {
    pub body: Value,
    pub request_id: Option<String>,
    pub content_type: Option<String>,
}

pub type ReceivedLog = Arc<Mutex<Vec<Received>>>;

/// Serve `app` on an ephemeral local port.
pub async fn serve(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}

/// Webhook that records every call and answers with the body it received.
pub async fn start_echo_webhook() -> (SocketAddr, ReceivedLog) {
    let log: ReceivedLog = Arc::new(Mutex::new(Vec::new()));

    async fn echo(
        State(log): State<ReceivedLog>,
        headers: HeaderMap,
        Json(body): Json<Value>,
    ) -> Json<Value> {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        log.lock().unwrap().push(Received {
            body: body.clone(),
            request_id: header("x-request-id"),
            content_type: header("content-type"),
        });
        Json(body)
    }

    let app = Router::new()
        .route("/webhook", post(echo))
        .with_state(log.clone());
    (serve(app).await, log)
}

/// Webhook that always answers `status` with a raw `body`.
pub async fn start_fixed_webhook(
    status: u16,
    content_type: &'static str,
    body: &'static str,
) -> SocketAddr {
    let app = Router::new().route(
        "/webhook",
        post(move || async move {
            (
                StatusCode::from_u16(status).unwrap(),
                [("content-type", content_type)],
                body,
            )
        }),
    );
    serve(app).await
}

/// Webhook that waits `delay` before answering `{}`.
pub async fn start_slow_webhook(delay: Duration) -> SocketAddr {
    let app = Router::new().route(
        "/webhook",
        post(move || async move {
            tokio::time::sleep(delay).await;
            Json(serde_json::json!({}))
        }),
    );
    serve(app).await
}

/// An address that refuses connections.
pub async fn refused_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

pub fn webhook_url(addr: SocketAddr) -> String {
    format!("http://{}/webhook", addr)
}

/// Gateway config pointing at a webhook on `addr`.
pub fn gateway_config(webhook: SocketAddr) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.listener.host = "127.0.0.1".into();
    config.listener.port = 0;
    config.webhook.url = Some(webhook_url(webhook));
    config
}

/// A gateway running in the background.
pub struct TestGateway {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub handle: tokio::task::JoinHandle<Result<(), std::io::Error>>,
}

impl TestGateway {
    pub fn chat_url(&self) -> String {
        format!("http://{}/api/chat", self.addr)
    }
}

/// Start a gateway on an ephemeral port.
pub async fn start_gateway(config: GatewayConfig) -> TestGateway {
    let listener = TcpListener::bind(config.listener.bind_address()).await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let server = HttpServer::new(config).unwrap();
    let rx = shutdown.subscribe();
    let handle = tokio::spawn(async move { server.run(listener, rx).await });
    TestGateway {
        addr,
        shutdown,
        handle,
    }
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
