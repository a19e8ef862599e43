//! Membership and bulk-order discount calculation.

use rust_decimal::Decimal;

use crate::config::RateTables;
use crate::error::{EngineError, EngineResult};
use crate::models::AuditStep;

/// Subtotal above which non-members receive the flat bulk discount.
pub const BULK_DISCOUNT_THRESHOLD: Decimal = Decimal::from_parts(3000, 0, 0, false, 0);

/// Flat discount for non-member orders above [`BULK_DISCOUNT_THRESHOLD`].
pub const BULK_DISCOUNT_AMOUNT: Decimal = Decimal::from_parts(20, 0, 0, false, 0);

/// The result of a membership discount calculation.
#[derive(Debug, Clone)]
pub struct MembershipDiscountResult {
    /// The discount amount.
    pub discount: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the membership discount for an order.
///
/// A membership tier found in the rate tables earns `subtotal * rate`, even
/// when that rate is zero. Any other membership string falls through to the
/// bulk rule: a flat discount when the subtotal exceeds the threshold.
///
/// # Examples
///
/// ```
/// use invoice_engine::calculation::calculate_membership_discount;
/// use invoice_engine::config::RateTables;
/// use rust_decimal::Decimal;
///
/// let rates = RateTables::default();
/// let gold = calculate_membership_discount("gold", Decimal::new(1000, 0), &rates, 1)?;
/// assert_eq!(gold.discount, Decimal::new(30, 0));
///
/// let bulk = calculate_membership_discount("none", Decimal::new(3001, 0), &rates, 1)?;
/// assert_eq!(bulk.discount, Decimal::new(20, 0));
/// # Ok::<(), invoice_engine::error::EngineError>(())
/// ```
pub fn calculate_membership_discount(
    membership: &str,
    subtotal: Decimal,
    rates: &RateTables,
    step_number: u32,
) -> EngineResult<MembershipDiscountResult> {
    let (discount, source, reasoning) = match rates.membership_rate(membership) {
        Some(rate) => {
            let discount = subtotal
                .checked_mul(rate)
                .ok_or_else(|| EngineError::amount_overflow("in membership discount"))?;
            (
                discount,
                "membership",
                format!(
                    "Membership '{}': ${} x {} = ${}",
                    membership, subtotal, rate, discount
                ),
            )
        }
        None if subtotal > BULK_DISCOUNT_THRESHOLD => (
            BULK_DISCOUNT_AMOUNT,
            "bulk",
            format!(
                "No membership rate for '{}'; subtotal ${} > ${}: flat ${} bulk discount",
                membership, subtotal, BULK_DISCOUNT_THRESHOLD, BULK_DISCOUNT_AMOUNT
            ),
        ),
        None => (
            Decimal::ZERO,
            "none",
            format!(
                "No membership rate for '{}' and subtotal ${} <= ${}: no discount",
                membership, subtotal, BULK_DISCOUNT_THRESHOLD
            ),
        ),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "membership_discount".to_string(),
        rule_name: "Membership Discount".to_string(),
        input: serde_json::json!({
            "membership": membership,
            "subtotal": subtotal.to_string()
        }),
        output: serde_json::json!({
            "discount": discount.to_string(),
            "source": source
        }),
        reasoning,
    };

    Ok(MembershipDiscountResult {
        discount,
        audit_step,
    })
}
