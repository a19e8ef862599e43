//! Pricing result models for the Invoice Pricing Engine.
//!
//! This module contains the [`PricingResult`] type and its associated
//! structures that capture every output of pricing an invoice: the
//! component breakdown, the total, warnings, and an audit trace.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Warning code emitted when a coupon code is not recognised.
pub const UNKNOWN_COUPON_CODE: &str = "unknown_coupon";

/// Warning code emitted when a large order is placed without a premium membership.
pub const MEMBERSHIP_UPGRADE_CODE: &str = "membership_upgrade";

/// The monetary components that make up an invoice total.
///
/// # Example
///
/// ```
/// use invoice_engine::models::PricingBreakdown;
/// use rust_decimal::Decimal;
///
/// let breakdown = PricingBreakdown {
///     subtotal: Decimal::new(100, 0),
///     fragile_fee: Decimal::ZERO,
///     shipping: Decimal::new(60, 0),
///     membership_discount: Decimal::ZERO,
///     coupon_discount: Decimal::ZERO,
///     total_discount: Decimal::ZERO,
///     tax: Decimal::new(7, 0),
///     total: Decimal::new(167, 0),
/// };
/// assert_eq!(breakdown.total, Decimal::new(167, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingBreakdown {
    /// Sum of `unit_price * qty` over all items.
    pub subtotal: Decimal,
    /// Handling fee for fragile items.
    pub fragile_fee: Decimal,
    /// Shipping cost from the country's tier table.
    pub shipping: Decimal,
    /// Discount from membership tier or bulk order.
    pub membership_discount: Decimal,
    /// Discount from the coupon code.
    pub coupon_discount: Decimal,
    /// Sum of membership and coupon discounts.
    pub total_discount: Decimal,
    /// Tax on the discounted subtotal.
    pub tax: Decimal,
    /// The final payable amount, never negative.
    pub total: Decimal,
}

/// A single step in the audit trace recording a pricing decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during pricing.
///
/// Warnings are advisory; they never stop a total from being produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

impl AuditWarning {
    /// The warning for a coupon code that is not in the coupon table.
    pub fn unknown_coupon() -> Self {
        Self {
            code: UNKNOWN_COUPON_CODE.to_string(),
            message: "Unknown coupon".to_string(),
            severity: "medium".to_string(),
        }
    }

    /// The advisory suggesting a membership upgrade for a large order.
    pub fn membership_upgrade() -> Self {
        Self {
            code: MEMBERSHIP_UPGRADE_CODE.to_string(),
            message: "Consider membership upgrade".to_string(),
            severity: "low".to_string(),
        }
    }
}

/// The complete audit trace for a pricing run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of pricing steps.
    pub steps: Vec<AuditStep>,
    /// Warnings in the order they were raised.
    pub warnings: Vec<AuditWarning>,
}

/// The complete result of pricing an invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingResult {
    /// The priced invoice's identifier.
    pub invoice_id: String,
    /// The customer the invoice belongs to.
    pub customer_id: String,
    /// The country used for tax and shipping.
    pub country: String,
    /// The monetary components and total.
    pub breakdown: PricingBreakdown,
    /// Complete audit trace of pricing decisions.
    pub audit_trace: AuditTrace,
}

impl PricingResult {
    /// Returns the warning messages in the order they were raised.
    pub fn warning_messages(&self) -> Vec<String> {
        self.audit_trace
            .warnings
            .iter()
            .map(|w| w.message.clone())
            .collect()
    }
}
