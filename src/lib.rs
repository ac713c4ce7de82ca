//! Chat gateway library.
//!
//! ```text
//! POST /api/chat → http::handler → flow::FlowRouter → upstream::Forwarder → webhook
//! ```

pub mod config;
pub mod error;
pub mod flow;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod resilience;
pub mod upstream;

pub use config::GatewayConfig;
pub use error::GatewayError;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
