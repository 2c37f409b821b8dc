//! Upstream API client.
//!
//! # Responsibilities
//! - Build the `generateContent` URL once from configuration
//! - Attach the credential as the `key` query parameter
//! - Drive the retrying fetcher and decode the reply
//!
//! # Security
//! - reqwest errors embed the request URL, which carries the key; every
//!   error leaving this module is stripped of it

use serde_json::Value;
use thiserror::Error;

use crate::config::{ApiKey, GatewayConfig};
use crate::resilience::{send_with_retry, FetchError, RetryPolicy};
use crate::upstream::payload::{GenerateRequest, UpstreamReply};

/// Errors from a single generation call.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("{0}")]
    Transport(reqwest::Error),

    #[error("invalid JSON in upstream response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<reqwest::Error> for UpstreamError {
    fn from(e: reqwest::Error) -> Self {
        UpstreamError::Transport(e.without_url())
    }
}

/// Client for the generative API. Cheap to clone.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    url: String,
    policy: RetryPolicy,
}

impl GeminiClient {
    /// Create a client for the model named in `config`.
    pub fn new(config: &GatewayConfig) -> Self {
        Self::with_http_client(reqwest::Client::new(), config)
    }

    /// Create a client reusing an existing connection pool.
    pub fn with_http_client(http: reqwest::Client, config: &GatewayConfig) -> Self {
        Self {
            http,
            url: config.upstream_url(),
            policy: RetryPolicy::from(&config.retries),
        }
    }

    /// Target URL, without credential.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Send `prompt` upstream and normalize the reply.
    pub async fn generate(&self, key: &ApiKey, prompt: &str) -> Result<UpstreamReply, UpstreamError> {
        let payload = &GenerateRequest::from_prompt(prompt);
        let (http, url) = (&self.http, &self.url);

        let response = send_with_retry(&self.policy, move || async move {
            http.post(url)
                .query(&[("key", key.expose())])
                .json(payload)
                .send()
                .await
                .map_err(reqwest::Error::without_url)
        })
        .await?;

        tracing::debug!(status = %response.status(), "Upstream responded");

        let body = response.bytes().await?;
        let value: Value = serde_json::from_slice(&body)?;
        Ok(UpstreamReply::from_body(&value))
    }
}
