//! Wire types for the `generateContent` call.

use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;

/// Substituted when a successful reply carries no extractable text.
pub const FALLBACK_TEXT: &str = "Generation failed to return text.";

/// Message used when an upstream error object has no `message`.
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown upstream error";

/// Outbound request body.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct GenerateRequest {
    pub contents: Vec<Content>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Content {
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Part {
    pub text: String,
}

impl GenerateRequest {
    /// Single content item wrapping the prompt verbatim.
    pub fn from_prompt(prompt: &str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        }
    }
}

/// Normalized upstream outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpstreamReply {
    /// Generated text, or [`FALLBACK_TEXT`].
    Text(String),
    /// Upstream reported an error object.
    Error { status: StatusCode, message: String },
}

impl UpstreamReply {
    /// Interpret a parsed response body.
    ///
    /// Matching is done on the raw JSON so that an odd response shape falls
    /// back to [`FALLBACK_TEXT`] instead of failing to decode.
    pub fn from_body(body: &Value) -> Self {
        if let Some(error) = body.get("error").filter(|e| !e.is_null()) {
            let status = error
                .get("code")
                .and_then(Value::as_u64)
                .and_then(|code| u16::try_from(code).ok())
                .and_then(|code| StatusCode::from_u16(code).ok())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            let message = error
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or(UNKNOWN_ERROR_MESSAGE)
                .to_string();
            return Self::Error { status, message };
        }

        let text = body
            .pointer("/candidates/0/content/parts/0/text")
            .and_then(Value::as_str)
            .unwrap_or(FALLBACK_TEXT);
        Self::Text(text.to_string())
    }
}
