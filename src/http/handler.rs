//! `POST /api/chat` handler.
//!
//! Presence check, flow routing, JSON reply. Every failure is logged and
//! counted with its kind before being collapsed by [`GatewayError`]'s
//! `IntoResponse`.

use std::time::Instant;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value;

use crate::error::{GatewayError, GatewayResult};
use crate::flow::{FlowMode, InboundRequest};
use crate::http::request::RequestId;
use crate::http::server::AppState;
use crate::observability::metrics;

pub async fn chat_handler(
    State(state): State<AppState>,
    request_id: RequestId,
    body: Result<Json<InboundRequest>, JsonRejection>,
) -> GatewayResult<Json<Value>> {
    let start = Instant::now();

    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => {
            let err = if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                GatewayError::PayloadTooLarge(rejection.body_text())
            } else {
                GatewayError::Validation(rejection.body_text())
            };
            return Err(fail(&request_id, FlowMode::Other, start, err));
        }
    };

    let mode = request
        .mode
        .as_ref()
        .map(FlowMode::of)
        .unwrap_or(FlowMode::Other);

    let flow = request
        .validate()
        .map_err(|err| fail(&request_id, mode, start, err))?;

    tracing::debug!(
        request_id = %request_id,
        mode = %mode,
        "Routing request"
    );

    match state.flow.route(flow, request_id.as_str()).await {
        Ok(value) => {
            metrics::record_request(mode, 200, start);
            tracing::info!(
                request_id = %request_id,
                mode = %mode,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Request forwarded"
            );
            Ok(Json(value))
        }
        Err(err) => Err(fail(&request_id, mode, start, err)),
    }
}

fn fail(
    request_id: &RequestId,
    mode: FlowMode,
    start: Instant,
    err: GatewayError,
) -> GatewayError {
    let status = err.status();
    match &err {
        GatewayError::Validation(detail) | GatewayError::PayloadTooLarge(detail) => tracing::warn!(
            request_id = %request_id,
            kind = err.kind(),
            detail = %detail,
            "Rejected request"
        ),
        _ => tracing::error!(
            request_id = %request_id,
            mode = %mode,
            kind = err.kind(),
            error = %err,
            "Request failed"
        ),
    }
    metrics::record_error(err.kind());
    metrics::record_request(mode, status.as_u16(), start);
    err
}
