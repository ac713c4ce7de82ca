//! Downstream side of the gateway.
//!
//! # Data Flow
//! ```text
//! FlowRouter
//!     → forwarder.rs (JSON POST under one deadline)
//!     → webhook
//!     → response body (JSON or raw text) back to the caller
//! ```
//!
//! One statically configured webhook; no load balancing or failover.

pub mod forwarder;

pub use forwarder::Forwarder;
