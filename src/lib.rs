//! Gemini prompt gateway library.
//!
//! Accepts `{"prompt": ...}`, calls the generative API with a server-side
//! key, and answers `{"text": ...}` or `{"error": ...}`.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod resilience;
pub mod upstream;

pub use config::schema::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
