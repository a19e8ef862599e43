//! Subtotal and fragile handling fee accumulation.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, LineItem};

/// Handling fee charged per unit of a fragile item.
pub const FRAGILE_FEE_PER_UNIT: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

/// The result of accumulating line items.
#[derive(Debug, Clone)]
pub struct SubtotalResult {
    /// Sum of `unit_price * qty` over all items.
    pub subtotal: Decimal,
    /// Sum of `FRAGILE_FEE_PER_UNIT * qty` over fragile items.
    pub fragile_fee: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Sums line totals and fragile handling fees over every item, once each.
///
/// Fails with [`EngineError::InvalidInvoice`] naming the sku when a line
/// total, the subtotal or the fragile fee does not fit in a `Decimal`.
///
/// # Examples
///
/// ```
/// use invoice_engine::calculation::calculate_subtotal;
/// use invoice_engine::models::LineItem;
/// use rust_decimal::Decimal;
///
/// let items = vec![LineItem {
///     sku: "TV-1".to_string(),
///     category: "electronics".to_string(),
///     unit_price: Decimal::new(100, 0),
///     qty: 2,
///     fragile: true,
/// }];
///
/// let result = calculate_subtotal(&items, 1)?;
/// assert_eq!(result.subtotal, Decimal::new(200, 0));
/// assert_eq!(result.fragile_fee, Decimal::new(10, 0));
/// # Ok::<(), invoice_engine::error::EngineError>(())
/// ```
pub fn calculate_subtotal(items: &[LineItem], step_number: u32) -> EngineResult<SubtotalResult> {
    let mut subtotal = Decimal::ZERO;
    let mut fragile_fee = Decimal::ZERO;
    // Kept as Decimal: the sum of valid i64 quantities can exceed i64::MAX.
    let mut fragile_units = Decimal::ZERO;

    for item in items {
        let overflow = || EngineError::amount_overflow(format!("for {}", item.sku));

        subtotal = item
            .line_total()
            .and_then(|line_total| subtotal.checked_add(line_total))
            .ok_or_else(overflow)?;

        if item.fragile {
            let qty = Decimal::from(item.qty);
            fragile_units = fragile_units.checked_add(qty).ok_or_else(overflow)?;
            fragile_fee = FRAGILE_FEE_PER_UNIT
                .checked_mul(qty)
                .and_then(|fee| fragile_fee.checked_add(fee))
                .ok_or_else(overflow)?;
        }
    }

    let audit_step = AuditStep {
        step_number,
        rule_id: "subtotal".to_string(),
        rule_name: "Subtotal and Fragile Fee".to_string(),
        input: serde_json::json!({
            "item_count": items.len(),
            "fragile_units": fragile_units.to_string(),
            "fragile_fee_per_unit": FRAGILE_FEE_PER_UNIT.to_string()
        }),
        output: serde_json::json!({
            "subtotal": subtotal.to_string(),
            "fragile_fee": fragile_fee.to_string()
        }),
        reasoning: format!(
            "{} item(s) sum to ${}; {} fragile unit(s) x ${} = ${}",
            items.len(),
            subtotal,
            fragile_units,
            FRAGILE_FEE_PER_UNIT,
            fragile_fee
        ),
    };

    Ok(SubtotalResult {
        subtotal,
        fragile_fee,
        audit_step,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn item(unit_price: &str, qty: i64, fragile: bool) -> LineItem {
        LineItem {
            sku: "A".to_string(),
            category: "other".to_string(),
            unit_price: dec(unit_price),
            qty,
            fragile,
        }
    }

    #[test]
    fn test_single_non_fragile_item() {
        let result = calculate_subtotal(&[item("100", 2, false)], 1).unwrap();
        assert_eq!(result.subtotal, dec("200"));
        assert_eq!(result.fragile_fee, Decimal::ZERO);
    }

    #[test]
    fn test_fragile_fee_is_five_per_unit() {
        let result = calculate_subtotal(&[item("100", 2, true)], 1).unwrap();
        assert_eq!(result.subtotal, dec("200"));
        assert_eq!(result.fragile_fee, dec("10"));
    }

    #[test]
    fn test_mixed_fragile_items() {
        let items = vec![item("100", 2, true), item("50", 3, false), item("1.25", 4, true)];
        let result = calculate_subtotal(&items, 1).unwrap();
        assert_eq!(result.subtotal, dec("355"));
        assert_eq!(result.fragile_fee, dec("30"));
    }

    #[test]
    fn test_item_order_does_not_change_sums() {
        let forward = vec![item("0.1", 3, true), item("0.2", 7, false), item("19.99", 1, true)];
        let mut reversed = forward.clone();
        reversed.reverse();

        let a = calculate_subtotal(&forward, 1).unwrap();
        let b = calculate_subtotal(&reversed, 1).unwrap();
        assert_eq!(a.subtotal, b.subtotal);
        assert_eq!(a.fragile_fee, b.fragile_fee);
    }

    #[test]
    fn test_fractional_prices_are_exact() {
        let result = calculate_subtotal(&[item("0.1", 1, false), item("0.2", 1, false)], 1).unwrap();
        assert_eq!(result.subtotal, dec("0.3"));
    }

    #[test]
    fn test_audit_step_records_fragile_units() {
        let result = calculate_subtotal(&[item("10", 4, true)], 3).unwrap();
        assert_eq!(result.audit_step.step_number, 3);
        assert_eq!(result.audit_step.rule_id, "subtotal");
        assert_eq!(result.audit_step.input["fragile_units"], "4");
        assert_eq!(result.audit_step.output["fragile_fee"], "20");
    }

    fn assert_overflow(result: EngineResult<SubtotalResult>, expected: &str) {
        match result {
            Err(EngineError::InvalidInvoice { message, .. }) => assert_eq!(message, expected),
            other => panic!("Expected InvalidInvoice, got {:?}", other),
        }
    }

    #[test]
    fn test_line_total_overflow_names_sku() {
        let mut big = item("10000000000000000000000", 10_000_000, false);
        big.sku = "BIG".to_string();
        assert_overflow(calculate_subtotal(&[big], 1), "Amount overflow for BIG");
    }

    #[test]
    fn test_subtotal_sum_overflow_names_second_sku() {
        let mut first = item("70000000000000000000000", 1_000_000, false);
        first.sku = "FIRST".to_string();
        let mut second = first.clone();
        second.sku = "SECOND".to_string();
        assert_overflow(calculate_subtotal(&[first, second], 1), "Amount overflow for SECOND");
    }

    #[test]
    fn test_fragile_units_beyond_i64_are_counted() {
        let items = vec![item("0", i64::MAX, true), item("0", 1, true)];
        let result = calculate_subtotal(&items, 1).unwrap();

        let units = Decimal::from(i64::MAX) + Decimal::ONE;
        assert_eq!(result.audit_step.input["fragile_units"], units.to_string());
        assert_eq!(result.fragile_fee, FRAGILE_FEE_PER_UNIT * units);
    }
}
