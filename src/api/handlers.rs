//! HTTP request handlers for the Invoice Pricing Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::Invoice;

use super::request::InvoiceRequest;
use super::response::{ApiError, ApiErrorResponse, ValidationResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/quote", post(quote_handler))
        .route("/validate", post(validate_handler))
        .route("/rates", get(rates_handler))
        .with_state(state)
}

type InvoicePayload = Result<Json<Option<InvoiceRequest>>, JsonRejection>;

/// Handler for POST /quote.
///
/// Prices the invoice in the body. A `null` body is priced as a missing
/// invoice and rejected by validation.
async fn quote_handler(State(state): State<AppState>, payload: InvoicePayload) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing quote request");

    let invoice = match read_invoice(payload, correlation_id) {
        Ok(invoice) => invoice,
        Err(response) => return response,
    };

    let start_time = Instant::now();
    match state.engine().price(invoice.as_ref()) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                invoice_id = %result.invoice_id,
                country = %result.country,
                total = %result.breakdown.total,
                warnings = result.audit_trace.warnings.len(),
                duration_us = start_time.elapsed().as_micros(),
                "Quote computed"
            );
            json_response(StatusCode::OK, &result)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Quote rejected"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for POST /validate.
///
/// Reports every validation problem without pricing the invoice.
async fn validate_handler(State(state): State<AppState>, payload: InvoicePayload) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing validation request");

    let invoice = match read_invoice(payload, correlation_id) {
        Ok(invoice) => invoice,
        Err(response) => return response,
    };

    let problems = match invoice.as_ref() {
        Some(invoice) => state.engine().validate(invoice),
        None => crate::calculation::validate_invoice(None),
    };
    info!(
        correlation_id = %correlation_id,
        problems = problems.len(),
        "Validation completed"
    );

    json_response(StatusCode::OK, &ValidationResponse::from(problems))
}

/// Handler for GET /rates.
///
/// Returns the rate tables the engine prices against.
async fn rates_handler(State(state): State<AppState>) -> Response {
    json_response(StatusCode::OK, state.engine().rates())
}

/// Unwraps the JSON payload into a domain invoice, or builds the 400 response.
fn read_invoice(payload: InvoicePayload, correlation_id: Uuid) -> Result<Option<Invoice>, Response> {
    match payload {
        Ok(Json(request)) => Ok(request.map(Into::into)),
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::new("VALIDATION_ERROR", body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            Err(json_response(StatusCode::BAD_REQUEST, &error))
        }
    }
}

fn json_response<T: serde::Serialize>(status: StatusCode, body: &T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}
