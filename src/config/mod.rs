//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! .env (dotenvy, never overriding the real environment)
//! GatewayConfig::default()
//!     → loader.rs (optional TOML file, then PORT / N8N_WEBHOOK_URL overrides)
//!     → CLI flags (main.rs)
//!     → validation.rs (semantic checks, fail fast)
//!     → GatewayConfig (immutable, handed to the server and forwarder)
//! ```

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_dotenv, validated, ConfigError};
pub use schema::{
    GatewayConfig, ListenerConfig, ObservabilityConfig, SecurityConfig, WebhookConfig,
};
pub use validation::{validate_config, ValidationError};
