//! Mapping of handler failures to HTTP responses.
//!
//! Every failure becomes exactly one status code and a `{"error": ...}`
//! body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Errors surfaced to the caller of `/api/generate`.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Credential variable unset at startup.
    #[error("{0} environment variable is not set on the Vercel server.")]
    MissingCredential(String),

    #[error("Method Not Allowed. Use POST.")]
    MethodNotAllowed,

    #[error("Missing \"prompt\" in request body.")]
    MissingPrompt,

    /// Body over the configured limit, or the client stopped sending it.
    #[error("Request body exceeds {0} bytes or could not be read.")]
    UnreadableBody(usize),

    /// Host-level request timeout fired.
    #[error("Request timed out.")]
    Timeout,

    /// Error object reported by the upstream API, forwarded verbatim.
    #[error("{message}")]
    Upstream { status: StatusCode, message: String },

    #[error("Internal Server Error: {0}")]
    Internal(String),
}

impl GatewayError {
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::MissingCredential(_) => StatusCode::INTERNAL_SERVER_ERROR,
            GatewayError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            GatewayError::MissingPrompt => StatusCode::BAD_REQUEST,
            GatewayError::UnreadableBody(_) => StatusCode::PAYLOAD_TOO_LARGE,
            GatewayError::Timeout => StatusCode::GATEWAY_TIMEOUT,
            GatewayError::Upstream { status, .. } => *status,
            GatewayError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(ErrorBody { error: self.to_string() })).into_response()
    }
}
