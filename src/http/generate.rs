//! The `/api/generate` handler.
//!
//! Checks, in order: credential configured, method is POST, body carries a
//! prompt. Only then is the upstream API called. The body is read last so
//! its size can never pre-empt the first two checks.

use axum::{
    body::{to_bytes, Body},
    extract::State,
    http::{HeaderMap, Method},
    Json,
};
use serde::Serialize;
use serde_json::Value;

use crate::http::error::GatewayError;
use crate::http::request::RequestIdExt;
use crate::http::server::AppState;
use crate::upstream::UpstreamReply;

/// Successful response body.
#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub text: String,
}

/// Proxy a prompt to the upstream API.
pub async fn generate(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
    body: Body,
) -> Result<Json<GenerateResponse>, GatewayError> {
    let request_id = headers.request_id();

    let Some(key) = state.api_key.as_ref() else {
        return Err(GatewayError::MissingCredential(state.api_key_env.to_string()));
    };

    if method != Method::POST {
        return Err(GatewayError::MethodNotAllowed);
    }

    let body = to_bytes(body, state.max_body_size)
        .await
        .map_err(|_| GatewayError::UnreadableBody(state.max_body_size))?;
    let prompt = extract_prompt(&body).ok_or(GatewayError::MissingPrompt)?;

    tracing::debug!(
        request_id = %request_id,
        prompt_len = prompt.len(),
        "Forwarding prompt upstream"
    );

    match state.upstream.generate(key, &prompt).await {
        Ok(UpstreamReply::Text(text)) => Ok(Json(GenerateResponse { text })),
        Ok(UpstreamReply::Error { status, message }) => {
            tracing::debug!(request_id = %request_id, status = %status, "Upstream reported an error");
            Err(GatewayError::Upstream { status, message })
        }
        Err(e) => {
            tracing::error!(request_id = %request_id, error = %e, "Generation request failed");
            Err(GatewayError::Internal(e.to_string()))
        }
    }
}

/// Pull a non-empty string `prompt` out of a JSON body.
///
/// Anything else (not JSON, not an object, wrong type, empty) counts as
/// missing.
fn extract_prompt(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    value
        .get("prompt")
        .and_then(Value::as_str)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ApiKey, GatewayConfig};
    use crate::http::HttpServer;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
        Router,
    };
    use tower::ServiceExt;

    fn router(key: Option<&str>) -> Router {
        let mut config = GatewayConfig::default();
        // Requests in these tests must never get this far.
        config.upstream.base_url = "http://127.0.0.1:9".into();
        HttpServer::new(config, key.and_then(ApiKey::new)).router()
    }

    async fn call(router: Router, method: Method, body: impl Into<Body>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri("/api/generate")
            .header("content-type", "application/json")
            .body(body.into())
            .unwrap();
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn test_extract_prompt() {
        assert_eq!(extract_prompt(br#"{"prompt":"hello"}"#), Some("hello".into()));
        assert_eq!(extract_prompt(br#"{"prompt":""}"#), None);
        assert_eq!(extract_prompt(br#"{"prompt":null}"#), None);
        assert_eq!(extract_prompt(br#"{"prompt":5}"#), None);
        assert_eq!(extract_prompt(br#"{"text":"hello"}"#), None);
        assert_eq!(extract_prompt(b"not json"), None);
        assert_eq!(extract_prompt(b""), None);
    }

    #[tokio::test]
    async fn test_non_post_is_405() {
        for method in [Method::GET, Method::PUT, Method::DELETE, Method::PATCH] {
            let (status, body) = call(router(Some("k")), method, r#"{"prompt":"hi"}"#).await;
            assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
            assert_eq!(body["error"], "Method Not Allowed. Use POST.");
        }
    }

    #[tokio::test]
    async fn test_missing_prompt_is_400() {
        for body in ["", "{}", r#"{"prompt":""}"#, "[1,2]"] {
            let (status, json) = call(router(Some("k")), Method::POST, body).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(json["error"], "Missing \"prompt\" in request body.");
        }
    }

    #[tokio::test]
    async fn test_missing_credential_wins_over_everything() {
        for method in [Method::GET, Method::POST] {
            let (status, body) = call(router(None), method, "").await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(
                body["error"],
                "GEMINI_API_KEY environment variable is not set on the Vercel server."
            );
        }
    }

    fn oversized_body() -> String {
        // 2 MiB, twice the default limit
        format!(r#"{{"prompt":"{}"}}"#, "a".repeat(2 * 1024 * 1024))
    }

    #[tokio::test]
    async fn test_large_body_does_not_preempt_credential_check() {
        for method in [Method::GET, Method::POST] {
            let (status, body) = call(router(None), method, oversized_body()).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(
                body["error"],
                "GEMINI_API_KEY environment variable is not set on the Vercel server."
            );
        }
    }

    #[tokio::test]
    async fn test_large_body_does_not_preempt_method_check() {
        let (status, body) = call(router(Some("k")), Method::GET, oversized_body()).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body["error"], "Method Not Allowed. Use POST.");
    }

    #[tokio::test]
    async fn test_large_post_body_is_json_413() {
        let (status, body) = call(router(Some("k")), Method::POST, oversized_body()).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(
            body["error"],
            "Request body exceeds 1048576 bytes or could not be read."
        );
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_500() {
        let mut config = GatewayConfig::default();
        config.upstream.base_url = "http://127.0.0.1:9".into();
        config.retries.max_attempts = 1;
        config.retries.base_delay_ms = 10;
        let router = HttpServer::new(config, ApiKey::new("secret-value")).router();

        let (status, body) = call(router, Method::POST, r#"{"prompt":"hi"}"#).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body["error"],
            "Internal Server Error: API request failed after multiple retries."
        );
    }
}
