//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, timeout)
//! - Bind server to listener
//! - Graceful shutdown
//!
//! # Design Decisions
//! - No body limit layer: the handler reads the body itself, after its
//!   credential and method checks, so those always answer first
//! - Timeouts surface as a JSON error like every other failure

use axum::{
    error_handling::HandleErrorLayer,
    routing::{any, get},
    BoxError, Router,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::{timeout::error::Elapsed, timeout::TimeoutLayer, ServiceBuilder};
use tower_http::trace::TraceLayer;

use crate::config::{ApiKey, GatewayConfig};
use crate::http::error::GatewayError;
use crate::http::generate::generate;
use crate::http::health::health;
use crate::http::request::{propagate_request_id_layer, set_request_id_layer};
use crate::lifecycle::ShutdownSignal;
use crate::upstream::GeminiClient;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub upstream: GeminiClient,
    pub api_key: Option<ApiKey>,
    /// Variable the key was read from, named in the missing-key error.
    pub api_key_env: Arc<str>,
    /// Largest request body the handler will buffer.
    pub max_body_size: usize,
}

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// `api_key` is `None` when the credential variable was unset; the server
    /// still starts and reports the problem per request.
    pub fn new(config: GatewayConfig, api_key: Option<ApiKey>) -> Self {
        let state = AppState {
            upstream: GeminiClient::new(&config),
            api_key,
            api_key_env: Arc::from(config.upstream.api_key_env.as_str()),
            max_body_size: config.security.max_body_size,
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        Router::new()
            .route("/api/generate", any(generate))
            .route("/health", get(health))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(HandleErrorLayer::new(handle_middleware_error))
                    .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs))),
            )
            .layer(TraceLayer::new_for_http())
            .layer(propagate_request_id_layer())
            .layer(set_request_id_layer())
    }

    /// Router with all layers, for serving or in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(self, listener: TcpListener, shutdown: ShutdownSignal) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.config.upstream_url(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

/// Turn a middleware failure into the endpoint's JSON error shape.
async fn handle_middleware_error(err: BoxError) -> GatewayError {
    if err.is::<Elapsed>() {
        tracing::warn!("Request exceeded the configured timeout");
        GatewayError::Timeout
    } else {
        tracing::error!(error = %err, "Middleware failure");
        GatewayError::Internal(err.to_string())
    }
}
