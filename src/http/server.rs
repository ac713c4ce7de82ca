//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with the single `POST /api/chat` route
//! - Wire up middleware (CORS, request ID, tracing, body limit)
//! - Serve on a bound listener until shutdown

use std::time::Duration;

use axum::{
    body::Body,
    extract::DefaultBodyLimit,
    http::Request,
    routing::post,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::GatewayConfig;
use crate::error::GatewayResult;
use crate::flow::FlowRouter;
use crate::http::handler::chat_handler;
use crate::http::request::{MakeUuidRequestId, X_REQUEST_ID};
use crate::lifecycle::shutdown;
use crate::upstream::Forwarder;

/// Path of the only application route.
pub const CHAT_PATH: &str = "/api/chat";

/// Application state injected into handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    pub flow: FlowRouter,
}

/// HTTP server for the chat gateway.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// The configuration is expected to have been validated already.
    pub fn new(config: GatewayConfig) -> GatewayResult<Self> {
        let forwarder = Forwarder::new(&config.webhook)?;
        let state = AppState {
            flow: FlowRouter::new(forwarder),
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        let request_id = ServiceBuilder::new()
            .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeUuidRequestId))
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                let request_id = request
                    .headers()
                    .get(X_REQUEST_ID)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("unknown");
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = %request_id,
                )
            }))
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID));

        Router::new()
            .route(CHAT_PATH, post(chat_handler))
            .with_state(state)
            .layer(DefaultBodyLimit::max(config.security.max_body_size))
            .layer(request_id)
            .layer(CorsLayer::permissive())
    }

    /// A clone of the fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Serve on `listener` until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            webhook_timeout = ?Duration::from_secs(self.config.webhook.timeout_secs),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::wait(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
