//! # Request Handlers
//!
//! Axum request handlers for the verification API.
//!
//! `POST /api/verify-order` checks a LemonSqueezy order and, if it is paid,
//! returns an hour-windowed token:
//!
//! ```text
//! method → orderId → credential → lookup → status → token
//! ```

use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::{Method, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use tracing::{error, info, instrument, warn};
use verify_core::{OrderId, VerifyError};

// =============================================================================
// Response Types
// =============================================================================

/// Successful verification
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub ok: bool,
    pub token: String,
}

impl TokenResponse {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            ok: true,
            token: token.into(),
        }
    }
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub ok: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: error.into(),
        }
    }
}

fn verify_error_to_response(err: VerifyError) -> (StatusCode, Json<ErrorResponse>) {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(ErrorResponse::new(err.public_message())))
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "order-verify",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Verify an order and issue a token.
///
/// Mounted with `any()` so wrong methods get the JSON 405 body rather than
/// axum's empty one. The body is taken as a `Result` so an unreadable or
/// oversized body cannot answer before the method check, or in plain text.
#[instrument(skip_all, fields(method = %method))]
pub async fn verify_order(
    State(state): State<AppState>,
    method: Method,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<TokenResponse>, (StatusCode, Json<ErrorResponse>)> {
    if method != Method::POST {
        return Err(verify_error_to_response(VerifyError::MethodNotAllowed));
    }

    let body = body.map_err(|rejection| {
        warn!("Unreadable request body: {}", rejection);
        verify_error_to_response(VerifyError::MissingOrderId)
    })?;

    let order_id = OrderId::from_request_body(&body)
        .ok_or_else(|| verify_error_to_response(VerifyError::MissingOrderId))?;

    let lookup = state.lookup.as_ref().ok_or_else(|| {
        let err = VerifyError::MissingCredential("LS_API_KEY");
        error!("{}", err);
        verify_error_to_response(err)
    })?;

    let record = lookup.fetch_order(&order_id).await.map_err(|e| {
        if e.is_server_fault() {
            error!("verify-order error: order_id={}, {}", order_id, e);
        } else {
            info!("Order rejected: order_id={}, {}", order_id, e);
        }
        verify_error_to_response(e)
    })?;

    if !record.is_paid() {
        info!(
            "Order not paid: order_id={}, status={}",
            order_id, record.status
        );
        return Err(verify_error_to_response(VerifyError::OrderNotPaid {
            status: record.status.label().to_string(),
        }));
    }

    let token = state.signer.sign(order_id.as_str());

    info!(
        "Order verified: order_id={}, provider={}, window={}",
        order_id,
        lookup.provider_name(),
        state.signer.current_window()
    );

    Ok(Json(TokenResponse::new(token)))
}
