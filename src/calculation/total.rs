//! Discount combination and final total assembly.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::AuditStep;

/// Combines membership and coupon discounts.
///
/// Discounts stack additively and are not capped; both are computed on the
/// undiscounted subtotal.
pub fn combine_discounts(
    membership_discount: Decimal,
    coupon_discount: Decimal,
) -> EngineResult<Decimal> {
    membership_discount
        .checked_add(coupon_discount)
        .ok_or_else(|| EngineError::amount_overflow("in total discount"))
}

/// The monetary components that feed the final total.
#[derive(Debug, Clone, Copy)]
pub struct TotalComponents {
    /// Sum of line totals.
    pub subtotal: Decimal,
    /// Shipping cost.
    pub shipping: Decimal,
    /// Fragile handling fee.
    pub fragile_fee: Decimal,
    /// Tax on the discounted subtotal.
    pub tax: Decimal,
    /// Combined discounts.
    pub total_discount: Decimal,
}

/// The result of assembling the final total.
#[derive(Debug, Clone)]
pub struct TotalResult {
    /// The payable total, never negative.
    pub total: Decimal,
    /// True if the raw total was negative and clamped to zero.
    pub clamped: bool,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Assembles `subtotal + shipping + fragile_fee + tax - total_discount`,
/// clamping a negative result to zero.
///
/// # Examples
///
/// ```
/// use invoice_engine::calculation::{TotalComponents, assemble_total};
/// use rust_decimal::Decimal;
///
/// let result = assemble_total(
///     TotalComponents {
///         subtotal: Decimal::new(200, 0),
///         shipping: Decimal::new(60, 0),
///         fragile_fee: Decimal::new(10, 0),
///         tax: Decimal::new(14, 0),
///         total_discount: Decimal::ZERO,
///     },
///     1,
/// )?;
/// assert_eq!(result.total, Decimal::new(284, 0));
/// # Ok::<(), invoice_engine::error::EngineError>(())
/// ```
pub fn assemble_total(components: TotalComponents, step_number: u32) -> EngineResult<TotalResult> {
    let TotalComponents {
        subtotal,
        shipping,
        fragile_fee,
        tax,
        total_discount,
    } = components;

    let raw_total = subtotal
        .checked_add(shipping)
        .and_then(|sum| sum.checked_add(fragile_fee))
        .and_then(|sum| sum.checked_add(tax))
        .and_then(|sum| sum.checked_sub(total_discount))
        .ok_or_else(|| EngineError::amount_overflow("in total"))?;
    let clamped = raw_total < Decimal::ZERO;
    let total = if clamped { Decimal::ZERO } else { raw_total };

    let mut reasoning = format!(
        "${} + ${} shipping + ${} fragile + ${} tax - ${} discount = ${}",
        subtotal.normalize(),
        shipping.normalize(),
        fragile_fee.normalize(),
        tax.normalize(),
        total_discount.normalize(),
        raw_total.normalize()
    );
    if clamped {
        reasoning.push_str("; negative total clamped to $0");
    }

    let audit_step = AuditStep {
        step_number,
        rule_id: "total".to_string(),
        rule_name: "Total Assembly".to_string(),
        input: serde_json::json!({
            "subtotal": subtotal.to_string(),
            "shipping": shipping.to_string(),
            "fragile_fee": fragile_fee.to_string(),
            "tax": tax.to_string(),
            "total_discount": total_discount.to_string()
        }),
        output: serde_json::json!({
            "total": total.to_string(),
            "clamped": clamped
        }),
        reasoning,
    };

    Ok(TotalResult {
        total,
        clamped,
        audit_step,
    })
}
