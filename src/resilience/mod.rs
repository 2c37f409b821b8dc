//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Upstream call:
//!     → retries.rs (429 / transport failure? wait and try again)
//!     → backoff.rs (base * 2^attempt, no jitter)
//! ```
//!
//! # Design Decisions
//! - Only rate limiting and transport failures are transient
//! - Attempts never overlap
//! - The retry helper is generic over the response type so it can run
//!   without a network

pub mod backoff;
pub mod retries;

pub use retries::{send_with_retry, FetchError, HasStatus, RetryPolicy};
