//! Upstream generative API subsystem.
//!
//! # Data Flow
//! ```text
//! prompt
//!     → payload.rs (GenerateRequest)
//!     → client.rs (POST ?key=..., retried on 429)
//!     → payload.rs (UpstreamReply: text, fallback, or error object)
//! ```

pub mod client;
pub mod payload;

pub use client::{GeminiClient, UpstreamError};
pub use payload::{GenerateRequest, UpstreamReply, FALLBACK_TEXT};
