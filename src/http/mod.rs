//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (CORS, request ID, trace, body limit)
//!     → handler.rs (JSON body → presence check → FlowRouter)
//!     → JSON response, x-request-id echoed
//! ```

pub mod handler;
pub mod request;
pub mod server;

pub use request::{RequestId, X_REQUEST_ID};
pub use server::{AppState, HttpServer, CHAT_PATH};
