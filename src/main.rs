//! Gemini prompt gateway.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client                 ┌──────────────────────────────────────────┐
//!     POST /api/generate     │                 GATEWAY                  │
//!     ───────────────────────┼─▶ http::server ─▶ http::generate         │
//!                            │                     │ validate            │
//!                            │                     ▼                     │
//!                            │               upstream::client ──────────┼──▶ Gemini API
//!                            │                     │ resilience::retries │    (?key=...)
//!     {"text"} / {"error"}   │                     ▼                     │
//!     ◀──────────────────────┼──────────── http::error / response       │
//!                            └──────────────────────────────────────────┘
//! ```

use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;

use gemini_gateway::lifecycle::{init_tracing, signals, Shutdown, Startup};
use gemini_gateway::HttpServer;

#[derive(Parser)]
#[command(name = "gemini-gateway", version, about = "Server-side proxy for the Gemini API")]
struct Args {
    /// Optional TOML configuration file.
    #[arg(short, long, env = "GATEWAY_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let Startup { config, api_key } = Startup::load(args.config.as_deref())?;
    init_tracing(&config);

    tracing::info!("gemini-gateway v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        model = %config.upstream.model,
        max_attempts = config.retries.max_attempts,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );
    if api_key.is_none() {
        tracing::warn!(
            variable = %config.upstream.api_key_env,
            "Upstream credential not set; every request will fail with 500"
        );
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.signal();
    tokio::spawn(async move {
        signals::wait_for_signal().await;
        shutdown.trigger();
    });

    let server = HttpServer::new(config, api_key);
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
