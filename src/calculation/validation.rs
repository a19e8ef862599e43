//! Invoice validation.
//!
//! Validation collects every problem it finds rather than stopping at the
//! first, so callers can report all of them at once.

use rust_decimal::Decimal;

use crate::models::{Invoice, LineItem};

/// Checks an invoice and returns every problem found, in discovery order.
///
/// Invoice-level problems come first, then item-level problems in item
/// order. Items are checked even when invoice-level checks fail. A missing
/// invoice yields the single problem `"Invoice is missing"`. An empty list
/// means the invoice is valid.
///
/// # Examples
///
/// ```
/// use invoice_engine::calculation::validate_invoice;
/// use invoice_engine::models::Invoice;
///
/// let invoice = Invoice {
///     invoice_id: String::new(),
///     customer_id: String::new(),
///     country: "TH".to_string(),
///     membership: "none".to_string(),
///     coupon: None,
///     items: vec![],
/// };
///
/// let problems = validate_invoice(Some(&invoice));
/// assert_eq!(
///     problems,
///     vec![
///         "Missing invoice_id",
///         "Missing customer_id",
///         "Invoice must contain items",
///     ]
/// );
/// assert_eq!(validate_invoice(None), vec!["Invoice is missing"]);
/// ```
pub fn validate_invoice(invoice: Option<&Invoice>) -> Vec<String> {
    let Some(invoice) = invoice else {
        return vec!["Invoice is missing".to_string()];
    };

    let mut problems = Vec::new();

    if invoice.invoice_id.is_empty() {
        problems.push("Missing invoice_id".to_string());
    }
    if invoice.customer_id.is_empty() {
        problems.push("Missing customer_id".to_string());
    }
    if invoice.items.is_empty() {
        problems.push("Invoice must contain items".to_string());
    }

    for item in &invoice.items {
        validate_item(item, &mut problems);
    }

    problems
}

fn validate_item(item: &LineItem, problems: &mut Vec<String>) {
    if item.sku.is_empty() {
        problems.push("Item sku is missing".to_string());
    }
    if item.qty <= 0 {
        problems.push(format!("Invalid qty for {}", item.sku));
    }
    if item.unit_price < Decimal::ZERO {
        problems.push(format!("Invalid price for {}", item.sku));
    }
    if item.category().is_none() {
        problems.push(format!("Unknown category for {}", item.sku));
    }
}
