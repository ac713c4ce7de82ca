//! Flow routing.
//!
//! Every mode takes the same path: rename the fields and forward. The
//! router is the seam where per-mode flows would be added.

use serde_json::Value;

use crate::error::GatewayResult;
use crate::flow::types::{FlowInput, ForwardPayload};
use crate::upstream::Forwarder;

/// Maps a validated request onto a webhook call.
#[derive(Clone, Debug)]
pub struct FlowRouter {
    forwarder: Forwarder,
}

impl FlowRouter {
    pub fn new(forwarder: Forwarder) -> Self {
        Self { forwarder }
    }

    pub fn forwarder(&self) -> &Forwarder {
        &self.forwarder
    }

    /// Forward `flow` and return the webhook's result unchanged.
    pub async fn route(&self, flow: FlowInput, request_id: &str) -> GatewayResult<Value> {
        let payload = ForwardPayload::from(flow);
        self.forwarder.forward(&payload, request_id).await
    }
}
