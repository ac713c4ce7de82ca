//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Forwarder → timeouts.rs (one deadline per webhook exchange) → webhook
//! ```
//!
//! The gateway never retries and has no circuit breaker; a failed or
//! timed-out forward is reported to the caller once.

pub mod timeouts;

pub use timeouts::with_deadline;
