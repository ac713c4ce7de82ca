//! Outbound webhook forwarder.
//!
//! # Responsibilities
//! - POST a [`ForwardPayload`] as JSON to the single configured webhook
//! - Bound the whole exchange by the configured deadline
//! - Hand back the webhook body untouched
//!
//! A body that parses as JSON is returned as that JSON value. Anything else
//! is returned as a JSON string holding the raw text, so an empty body
//! becomes `""`.

use std::time::{Duration, Instant};

use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::Client;
use serde_json::Value;

use crate::config::WebhookConfig;
use crate::error::{GatewayError, GatewayResult};
use crate::flow::ForwardPayload;
use crate::http::request::X_REQUEST_ID;
use crate::resilience::with_deadline;

const USER_AGENT: &str = concat!("chat-gateway/", env!("CARGO_PKG_VERSION"));

/// Client for the downstream webhook.
///
/// Cloning is cheap; clones share one connection pool.
#[derive(Clone, Debug)]
pub struct Forwarder {
    client: Client,
    url: Option<String>,
    timeout: Duration,
}

impl Forwarder {
    /// Build a forwarder from the webhook section of the config.
    ///
    /// A missing URL is not an error here. It is reported on every forward
    /// instead, for callers that skip startup validation.
    pub fn new(config: &WebhookConfig) -> GatewayResult<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            client,
            url: config.url.clone().filter(|u| !u.is_empty()),
            timeout: config.timeout(),
        })
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Send `payload` to the webhook and return its response body.
    pub async fn forward(
        &self,
        payload: &ForwardPayload,
        request_id: &str,
    ) -> GatewayResult<Value> {
        let url = self
            .url
            .as_deref()
            .ok_or_else(|| GatewayError::Downstream("webhook URL not configured".to_string()))?;

        let start = Instant::now();
        let result = with_deadline(self.timeout, self.exchange(url, payload, request_id)).await;

        tracing::debug!(
            request_id = %request_id,
            elapsed_ms = start.elapsed().as_millis() as u64,
            ok = result.is_ok(),
            "Webhook exchange finished"
        );

        result
    }

    async fn exchange(
        &self,
        url: &str,
        payload: &ForwardPayload,
        request_id: &str,
    ) -> GatewayResult<Value> {
        let mut request = self.client.post(url).json(payload);
        if let Ok(value) = HeaderValue::from_str(request_id) {
            request = request.header(X_REQUEST_ID, value);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Downstream(format!("webhook answered {}", status)));
        }

        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.contains("json"))
            .unwrap_or(false);
        let text = response.text().await?;

        Ok(decode_body(text, is_json))
    }
}

/// Interpret a webhook body. JSON is parsed whether or not the content type
/// says so; when parsing fails the raw text is kept.
fn decode_body(text: String, declared_json: bool) -> Value {
    match serde_json::from_str(&text) {
        Ok(value) => value,
        Err(e) => {
            if declared_json && !text.is_empty() {
                tracing::warn!(
                    error = %e,
                    "Webhook declared JSON but sent invalid JSON; passing raw text"
                );
            }
            Value::String(text)
        }
    }
}
