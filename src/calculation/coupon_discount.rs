//! Coupon code discount calculation.

use rust_decimal::Decimal;

use crate::config::RateTables;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, AuditWarning};

/// The result of applying a coupon code.
#[derive(Debug, Clone)]
pub struct CouponDiscountResult {
    /// The discount amount.
    pub discount: Decimal,
    /// Set when a non-blank code was not recognised.
    pub warning: Option<AuditWarning>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Applies a coupon code to the subtotal.
///
/// A missing, empty or all-whitespace code gives no discount and no
/// warning. Otherwise the trimmed code is looked up: a known code earns
/// `subtotal * rate`, an unknown code earns nothing and raises an
/// "Unknown coupon" warning.
///
/// # Examples
///
/// ```
/// use invoice_engine::calculation::apply_coupon;
/// use invoice_engine::config::RateTables;
/// use rust_decimal::Decimal;
///
/// let rates = RateTables::default();
///
/// let vip = apply_coupon(Some(" VIP20 "), Decimal::new(1000, 0), &rates, 1)?;
/// assert_eq!(vip.discount, Decimal::new(200, 0));
/// assert!(vip.warning.is_none());
///
/// let bogus = apply_coupon(Some("INVALID"), Decimal::new(1000, 0), &rates, 1)?;
/// assert_eq!(bogus.discount, Decimal::ZERO);
/// assert_eq!(bogus.warning.unwrap().message, "Unknown coupon");
/// # Ok::<(), invoice_engine::error::EngineError>(())
/// ```
pub fn apply_coupon(
    coupon: Option<&str>,
    subtotal: Decimal,
    rates: &RateTables,
    step_number: u32,
) -> EngineResult<CouponDiscountResult> {
    let code = coupon.map(str::trim).filter(|code| !code.is_empty());

    let (discount, warning, reasoning) = match code {
        None => (
            Decimal::ZERO,
            None,
            "No coupon code supplied".to_string(),
        ),
        Some(code) => match rates.coupon_rate(code) {
            Some(rate) => {
                let discount = subtotal
                    .checked_mul(rate)
                    .ok_or_else(|| EngineError::amount_overflow("in coupon discount"))?;
                (
                    discount,
                    None,
                    format!("Coupon '{}': ${} x {} = ${}", code, subtotal, rate, discount),
                )
            }
            None => (
                Decimal::ZERO,
                Some(AuditWarning::unknown_coupon()),
                format!("Coupon '{}' is not recognised: no discount", code),
            ),
        },
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "coupon_discount".to_string(),
        rule_name: "Coupon Discount".to_string(),
        input: serde_json::json!({
            "coupon": coupon,
            "subtotal": subtotal.to_string()
        }),
        output: serde_json::json!({
            "code": code,
            "discount": discount.to_string(),
            "recognised": code.is_some() && warning.is_none()
        }),
        reasoning,
    };

    Ok(CouponDiscountResult {
        discount,
        warning,
        audit_step,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ShippingRates;
    use std::collections::HashMap;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn apply(coupon: Option<&str>) -> CouponDiscountResult {
        apply_coupon(coupon, dec("1000"), &RateTables::default(), 1).unwrap()
    }

    #[test]
    fn test_welcome10() {
        let result = apply(Some("WELCOME10"));
        assert_eq!(result.discount, dec("100"));
        assert!(result.warning.is_none());
    }

    #[test]
    fn test_vip20() {
        assert_eq!(apply(Some("VIP20")).discount, dec("200"));
    }

    #[test]
    fn test_student5() {
        assert_eq!(apply(Some("STUDENT5")).discount, dec("50"));
    }

    #[test]
    fn test_code_is_trimmed_before_lookup() {
        let result = apply(Some("  WELCOME10\t"));
        assert_eq!(result.discount, dec("100"));
        assert!(result.warning.is_none());
        assert_eq!(result.audit_step.output["code"], "WELCOME10");
    }

    #[test]
    fn test_unknown_code_warns() {
        let result = apply(Some("INVALID"));
        assert_eq!(result.discount, Decimal::ZERO);
        let warning = result.warning.unwrap();
        assert_eq!(warning.message, "Unknown coupon");
        assert_eq!(warning.code, "unknown_coupon");
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let result = apply(Some("welcome10"));
        assert_eq!(result.discount, Decimal::ZERO);
        assert!(result.warning.is_some());
    }

    #[test]
    fn test_absent_empty_and_blank_codes_are_silent() {
        for coupon in [None, Some(""), Some("   ")] {
            let result = apply(coupon);
            assert_eq!(result.discount, Decimal::ZERO, "coupon {:?}", coupon);
            assert!(result.warning.is_none(), "coupon {:?}", coupon);
        }
    }

    #[test]
    fn test_audit_step_for_blank_code() {
        let result = apply(Some("  "));
        assert_eq!(result.audit_step.rule_id, "coupon_discount");
        assert!(result.audit_step.output["code"].is_null());
        assert_eq!(result.audit_step.output["recognised"], false);
    }

    #[test]
    fn test_discount_overflow_is_an_error() {
        let defaults = RateTables::default();
        let rates = RateTables::new(
            defaults.tax().clone(),
            HashMap::from([("TENX".to_string(), dec("10"))]),
            HashMap::new(),
            ShippingRates {
                default: defaults.shipping_table("XX").clone(),
                countries: HashMap::new(),
            },
        )
        .unwrap();

        match apply_coupon(Some("TENX"), Decimal::MAX, &rates, 1) {
            Err(EngineError::InvalidInvoice { message, .. }) => {
                assert_eq!(message, "Amount overflow in coupon discount");
            }
            other => panic!("Expected InvalidInvoice, got {:?}", other),
        }
    }
}
