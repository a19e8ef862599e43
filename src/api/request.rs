//! Request types for the Invoice Pricing Engine API.
//!
//! Request fields are lenient: identifiers, items and flags default when
//! absent so that the engine's validation can report every problem, rather
//! than the first missing field stopping deserialization.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Invoice, LineItem};

/// Request body for the `/quote` and `/validate` endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceRequest {
    /// Invoice identifier.
    #[serde(default)]
    pub invoice_id: String,
    /// Customer identifier.
    #[serde(default)]
    pub customer_id: String,
    /// Country code for tax and shipping.
    #[serde(default)]
    pub country: String,
    /// Membership tier name.
    #[serde(default = "default_membership")]
    pub membership: String,
    /// Optional coupon code.
    #[serde(default)]
    pub coupon: Option<String>,
    /// The line items.
    #[serde(default)]
    pub items: Vec<LineItemRequest>,
}

fn default_membership() -> String {
    "none".to_string()
}

/// Line item information in an invoice request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItemRequest {
    /// Stock keeping unit.
    #[serde(default)]
    pub sku: String,
    /// Category name.
    pub category: String,
    /// Price per unit.
    pub unit_price: Decimal,
    /// Number of units.
    pub qty: i64,
    /// Whether the item is fragile.
    #[serde(default)]
    pub fragile: bool,
}

impl From<InvoiceRequest> for Invoice {
    fn from(req: InvoiceRequest) -> Self {
        Invoice {
            invoice_id: req.invoice_id,
            customer_id: req.customer_id,
            country: req.country,
            membership: req.membership,
            coupon: req.coupon,
            items: req.items.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<LineItemRequest> for LineItem {
    fn from(req: LineItemRequest) -> Self {
        LineItem {
            sku: req.sku,
            category: req.category,
            unit_price: req.unit_price,
            qty: req.qty,
            fragile: req.fragile,
        }
    }
}
