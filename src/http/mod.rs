//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID)
//!     → generate.rs (validate, call upstream, map reply)
//!     → error.rs (failures as {"error": ...})
//!     → Send to client
//! ```

pub mod error;
pub mod generate;
pub mod health;
pub mod request;
pub mod server;

pub use error::GatewayError;
pub use request::{RequestIdExt, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
