//! Configuration validation.
//!
//! Serde handles syntax; this pass checks values. Every problem is
//! collected rather than stopping at the first one.

use std::net::SocketAddr;
use thiserror::Error;

use crate::config::schema::GatewayConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not a socket address")]
    BindAddress(String),

    #[error("upstream.base_url '{0}' is not a valid URL")]
    BaseUrl(String),

    #[error("upstream.model must not be empty")]
    EmptyModel,

    #[error("upstream.api_key_env must not be empty")]
    EmptyKeyVariable,

    #[error("retries.max_attempts must be at least 1")]
    NoAttempts,

    #[error("timeouts.request_secs must be greater than 0")]
    ZeroTimeout,
}

/// Check a configuration, returning every problem found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }
    if url::Url::parse(&config.upstream.base_url).is_err() {
        errors.push(ValidationError::BaseUrl(config.upstream.base_url.clone()));
    }
    if config.upstream.model.trim().is_empty() {
        errors.push(ValidationError::EmptyModel);
    }
    if config.upstream.api_key_env.trim().is_empty() {
        errors.push(ValidationError::EmptyKeyVariable);
    }
    if config.retries.max_attempts == 0 {
        errors.push(ValidationError::NoAttempts);
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
