//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse, environment overrides)
//!     → validation.rs (semantic checks)
//!     → GatewayConfig (validated, immutable)
//!     → shared via Arc with the request handler
//!
//! GEMINI_API_KEY
//!     → credential.rs (read once, redacted ApiKey)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; no hot reload
//! - All fields have defaults to allow running with no file at all
//! - A missing credential is not a startup error; the handler reports it
//!   per request

pub mod credential;
pub mod loader;
pub mod schema;
pub mod validation;

pub use credential::ApiKey;
pub use loader::{load_config, ConfigError};
pub use schema::{GatewayConfig, ListenerConfig, RetryConfig, UpstreamConfig};
