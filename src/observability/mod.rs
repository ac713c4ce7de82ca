//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Request handler / forwarder
//!     → logging.rs (tracing events tagged with request_id, mode, kind)
//!     → metrics.rs (counters and histograms, Prometheus when enabled)
//! ```

pub mod logging;
pub mod metrics;
