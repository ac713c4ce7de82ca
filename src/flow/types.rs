//! Request and payload shapes carried through the flow.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::GatewayError;

/// Body of `POST /api/chat`.
///
/// Fields are untyped JSON: only presence is checked, and whatever the
/// client sent is forwarded as-is.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct InboundRequest {
    pub input: Option<Value>,
    pub mode: Option<Value>,
}

/// A request that passed the presence check.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowInput {
    pub mode: Value,
    pub input: Value,
}

/// JSON falsiness: `null`, `false`, `0` and `""` count as absent.
/// Arrays and objects are present even when empty.
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

impl InboundRequest {
    /// Require both fields to be present and truthy.
    pub fn validate(self) -> Result<FlowInput, GatewayError> {
        let present = |v: Option<Value>| v.filter(is_present);
        match (present(self.mode), present(self.input)) {
            (Some(mode), Some(input)) => Ok(FlowInput { mode, input }),
            (mode, input) => Err(GatewayError::Validation(format!(
                "mode present: {}, input present: {}",
                mode.is_some(),
                input.is_some()
            ))),
        }
    }
}

/// JSON body POSTed to the webhook.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForwardPayload {
    /// Copied from the inbound `mode`.
    #[serde(rename = "type")]
    pub kind: Value,
    /// Copied from the inbound `input`.
    pub payload: Value,
}

impl From<FlowInput> for ForwardPayload {
    fn from(flow: FlowInput) -> Self {
        Self {
            kind: flow.mode,
            payload: flow.input,
        }
    }
}

/// The declared request modes.
///
/// Modes do not change forwarding. This type only bounds the label set used
/// in metrics and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlowMode {
    Chat,
    Voice,
    Video,
    Other,
}

impl FlowMode {
    pub fn classify(mode: &str) -> Self {
        match mode {
            "chat" => FlowMode::Chat,
            "voice" => FlowMode::Voice,
            "video" => FlowMode::Video,
            _ => FlowMode::Other,
        }
    }

    /// Label for an arbitrary JSON mode; non-strings are `Other`.
    pub fn of(mode: &Value) -> Self {
        mode.as_str().map(Self::classify).unwrap_or(FlowMode::Other)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FlowMode::Chat => "chat",
            FlowMode::Voice => "voice",
            FlowMode::Video => "video",
            FlowMode::Other => "other",
        }
    }
}

impl fmt::Display for FlowMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
