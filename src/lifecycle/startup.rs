//! Startup orchestration.
//!
//! # Responsibilities
//! - Load and validate configuration
//! - Initialize logging
//! - Read the upstream credential once
//!
//! # Design Decisions
//! - Fail fast: any configuration error is fatal
//! - A missing credential is logged, not fatal

use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{load_config, ApiKey, ConfigError, GatewayConfig};

/// Everything the server needs, read once at process start.
#[derive(Debug)]
pub struct Startup {
    pub config: GatewayConfig,
    pub api_key: Option<ApiKey>,
}

impl Startup {
    /// Load configuration and the credential.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = load_config(config_path)?;
        let api_key = ApiKey::from_env(&config.upstream.api_key_env);
        Ok(Self { config, api_key })
    }
}

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` wins; otherwise the configured level applies to this crate
/// and `tower_http`.
pub fn init_tracing(config: &GatewayConfig) {
    let level = &config.observability.log_level;
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("gemini_gateway={level},tower_http={level}").into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
