//! HTTP API module for the Invoice Pricing Engine.
//!
//! This module exposes the engine over REST: `POST /quote` prices an
//! invoice, `POST /validate` reports validation problems, and `GET /rates`
//! lists the active rate tables.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{InvoiceRequest, LineItemRequest};
pub use response::{ApiError, ApiErrorResponse, ValidationResponse};
pub use state::AppState;
