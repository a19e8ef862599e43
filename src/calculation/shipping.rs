//! Tiered shipping lookup.

use rust_decimal::Decimal;

use crate::config::{RateTables, ShippingTable};
use crate::models::AuditStep;

/// The result of a shipping lookup, including the cost and audit step.
#[derive(Debug, Clone)]
pub struct ShippingResult {
    /// The shipping cost.
    pub shipping: Decimal,
    /// The audit step recording this lookup.
    pub audit_step: AuditStep,
}

/// Returns the cost of the first tier whose threshold strictly exceeds `subtotal`.
///
/// Tables are tiny, so this is a linear scan. Returns zero if no tier
/// matches, which a well-formed table (unbounded final tier) never allows.
pub fn shipping_cost(table: &ShippingTable, subtotal: Decimal) -> Decimal {
    table
        .tiers()
        .iter()
        .find(|tier| tier.applies_to(subtotal))
        .map(|tier| tier.cost)
        .unwrap_or(Decimal::ZERO)
}

/// Looks up shipping for a country, falling back to the default table.
///
/// # Examples
///
/// ```
/// use invoice_engine::calculation::calculate_shipping;
/// use invoice_engine::config::RateTables;
/// use rust_decimal::Decimal;
///
/// let rates = RateTables::default();
/// let below = calculate_shipping("TH", Decimal::new(499_999, 3), &rates, 1);
/// let at = calculate_shipping("TH", Decimal::new(500, 0), &rates, 1);
/// assert_eq!(below.shipping, Decimal::new(60, 0));
/// assert_eq!(at.shipping, Decimal::ZERO);
/// ```
pub fn calculate_shipping(
    country: &str,
    subtotal: Decimal,
    rates: &RateTables,
    step_number: u32,
) -> ShippingResult {
    let table = rates.shipping_table(country);
    let table_name = if rates.has_shipping_table(country) {
        country
    } else {
        "default"
    };

    let matched = table
        .tiers()
        .iter()
        .position(|tier| tier.applies_to(subtotal));
    let shipping = shipping_cost(table, subtotal);

    let reasoning = match matched.map(|i| table.tiers()[i].below) {
        Some(Some(threshold)) => format!(
            "Subtotal ${} < ${} in {} table: shipping ${}",
            subtotal, threshold, table_name, shipping
        ),
        Some(None) => format!(
            "Subtotal ${} reached the top tier of {} table: shipping ${}",
            subtotal, table_name, shipping
        ),
        None => format!(
            "No tier in {} table matched subtotal ${}: shipping $0",
            table_name, subtotal
        ),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "shipping".to_string(),
        rule_name: "Shipping Tier Lookup".to_string(),
        input: serde_json::json!({
            "country": country,
            "subtotal": subtotal.to_string()
        }),
        output: serde_json::json!({
            "shipping": shipping.to_string(),
            "table": table_name,
            "tier": matched.map(|i| i + 1)
        }),
        reasoning,
    };

    ShippingResult {
        shipping,
        audit_step,
    }
}
