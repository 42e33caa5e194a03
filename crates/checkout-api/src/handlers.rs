//! # Request Handlers
//!
//! Checkout controller: maps the path parameter onto a `CheckoutService` call
//! and the boolean result onto an HTTP response.

use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use checkout_core::{CardNumber, CheckoutError};
use serde::Serialize;
use tracing::{debug, instrument};

/// Body returned when the card is authorized
pub const PAYMENT_ACCEPTED: &str = "Payment accepted";

/// Body returned when the card is declined
pub const PAYMENT_UNAUTHORIZED: &str = "Payment unauthorized";

// =============================================================================
// Response Types
// =============================================================================

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: u16) -> Self {
        Self {
            error: error.into(),
            code,
        }
    }
}

fn checkout_error_to_response(err: CheckoutError) -> (StatusCode, Json<ErrorResponse>) {
    let code = err.status_code();
    let response = ErrorResponse::new(err.to_string(), code);
    (
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(response),
    )
}

/// Map a checkout decision to its status and plain-text body
pub fn checkout_response(authorized: bool) -> (StatusCode, &'static str) {
    if authorized {
        (StatusCode::OK, PAYMENT_ACCEPTED)
    } else {
        (StatusCode::PAYMENT_REQUIRED, PAYMENT_UNAUTHORIZED)
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// `POST /api/v1.0/checkout/{cardnumber}`
///
/// The card number reaches the service exactly as the router decoded it.
#[instrument(skip(state, card_number))]
pub async fn checkout(
    State(state): State<AppState>,
    Path(card_number): Path<String>,
) -> Result<(StatusCode, &'static str), (StatusCode, Json<ErrorResponse>)> {
    let card = CardNumber::new(card_number);

    let authorized = state.service.checkout(&card).await.map_err(|e| {
        debug!("Checkout failed for card {}: {}", card, e);
        checkout_error_to_response(e)
    })?;

    Ok(checkout_response(authorized))
}
