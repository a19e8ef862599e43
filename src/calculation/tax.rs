//! Country tax calculation.

use rust_decimal::Decimal;

use crate::config::RateTables;
use crate::error::{EngineError, EngineResult};
use crate::models::AuditStep;

/// The result of a tax calculation.
#[derive(Debug, Clone)]
pub struct TaxResult {
    /// The tax amount. Negative when the taxable amount is negative.
    pub tax: Decimal,
    /// The rate that was applied.
    pub rate: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates tax on the discounted subtotal.
///
/// The taxable amount is passed in as-is and may be negative when discounts
/// exceed the subtotal. Shipping and fragile fees are never part of it.
///
/// # Examples
///
/// ```
/// use invoice_engine::calculation::calculate_tax;
/// use invoice_engine::config::RateTables;
/// use rust_decimal::Decimal;
///
/// let rates = RateTables::default();
/// let result = calculate_tax("TH", Decimal::new(100, 0), &rates, 1)?;
/// assert_eq!(result.tax, Decimal::new(7, 0));
/// # Ok::<(), invoice_engine::error::EngineError>(())
/// ```
pub fn calculate_tax(
    country: &str,
    taxable_amount: Decimal,
    rates: &RateTables,
    step_number: u32,
) -> EngineResult<TaxResult> {
    let rate = rates.tax_rate(country);
    let tax = taxable_amount
        .checked_mul(rate)
        .ok_or_else(|| EngineError::amount_overflow("in tax"))?;

    let audit_step = AuditStep {
        step_number,
        rule_id: "tax".to_string(),
        rule_name: "Country Tax".to_string(),
        input: serde_json::json!({
            "country": country,
            "taxable_amount": taxable_amount.to_string()
        }),
        output: serde_json::json!({
            "rate": rate.to_string(),
            "tax": tax.to_string()
        }),
        reasoning: format!(
            "${} x {} ({}) = ${}",
            taxable_amount.normalize(),
            rate.normalize(),
            country,
            tax.normalize()
        ),
    };

    Ok(TaxResult {
        tax,
        rate,
        audit_step,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ShippingRates, TaxRates};
    use std::collections::HashMap;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn tax(country: &str, amount: &str) -> Decimal {
        calculate_tax(country, dec(amount), &RateTables::default(), 1)
            .unwrap()
            .tax
    }

    #[test]
    fn test_country_rates() {
        assert_eq!(tax("TH", "100"), dec("7"));
        assert_eq!(tax("JP", "100"), dec("10"));
        assert_eq!(tax("US", "100"), dec("8"));
    }

    #[test]
    fn test_unknown_country_uses_default_rate() {
        let result = calculate_tax("XX", dec("100"), &RateTables::default(), 1).unwrap();
        assert_eq!(result.rate, dec("0.05"));
        assert_eq!(result.tax, dec("5"));
    }

    #[test]
    fn test_negative_taxable_amount_gives_negative_tax() {
        assert_eq!(tax("TH", "-24"), dec("-1.68"));
    }

    #[test]
    fn test_audit_step_reasoning() {
        let result = calculate_tax("JP", dec("870"), &RateTables::default(), 6).unwrap();
        assert_eq!(result.audit_step.step_number, 6);
        assert_eq!(result.audit_step.reasoning, "$870 x 0.1 (JP) = $87");
    }

    #[test]
    fn test_tax_overflow_is_an_error() {
        let defaults = RateTables::default();
        let rates = RateTables::new(
            TaxRates {
                default_rate: dec("2"),
                countries: HashMap::new(),
            },
            HashMap::new(),
            HashMap::new(),
            ShippingRates {
                default: defaults.shipping_table("XX").clone(),
                countries: HashMap::new(),
            },
        )
        .unwrap();

        match calculate_tax("XX", Decimal::MAX, &rates, 1) {
            Err(EngineError::InvalidInvoice { message, .. }) => {
                assert_eq!(message, "Amount overflow in tax");
            }
            other => panic!("Expected InvalidInvoice, got {:?}", other),
        }
    }
}
