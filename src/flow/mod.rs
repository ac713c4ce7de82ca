//! Flow subsystem.
//!
//! # Data Flow
//! ```text
//! InboundRequest { mode, input }
//!     → types.rs (presence check → FlowInput)
//!     → router.rs (rename → ForwardPayload { type, payload })
//!     → upstream::Forwarder
//! ```
//!
//! `ForwardPayload.type == mode` and `ForwardPayload.payload == input`
//! hold for every forwarded request.

pub mod router;
pub mod types;

pub use router::FlowRouter;
pub use types::{FlowInput, FlowMode, ForwardPayload, InboundRequest};
