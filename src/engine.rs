//! The pricing pipeline.
//!
//! [`PricingEngine`] owns a set of rate tables and runs every pricing stage
//! in a fixed order: validation, subtotal and fragile fee, shipping,
//! membership discount, coupon discount, tax, total, and the upgrade
//! advisory. It holds no mutable state, so one engine can be cloned and
//! shared across threads or request handlers.

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::calculation::{
    TotalComponents, apply_coupon, assemble_total, calculate_membership_discount,
    calculate_shipping, calculate_subtotal, calculate_tax, check_membership_upgrade,
    combine_discounts, validate_invoice,
};
use crate::config::RateTables;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, AuditTrace, AuditWarning, Invoice, PricingBreakdown, PricingResult};

/// Prices invoices against a fixed set of rate tables.
///
/// # Example
///
/// ```
/// use invoice_engine::PricingEngine;
/// use invoice_engine::models::{Invoice, LineItem};
/// use rust_decimal::Decimal;
///
/// let engine = PricingEngine::default();
/// let invoice = Invoice {
///     invoice_id: "I-001".to_string(),
///     customer_id: "C-001".to_string(),
///     country: "TH".to_string(),
///     membership: "none".to_string(),
///     coupon: None,
///     items: vec![LineItem {
///         sku: "BK-1".to_string(),
///         category: "book".to_string(),
///         unit_price: Decimal::new(100, 0),
///         qty: 1,
///         fragile: false,
///     }],
/// };
///
/// let (total, warnings) = engine.compute_total(&invoice)?;
/// assert_eq!(total, Decimal::new(167, 0));
/// assert!(warnings.is_empty());
/// # Ok::<(), invoice_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct PricingEngine {
    rates: Arc<RateTables>,
}

impl PricingEngine {
    /// Creates an engine over the given rate tables.
    pub fn new(rates: RateTables) -> Self {
        Self {
            rates: Arc::new(rates),
        }
    }

    /// Creates an engine sharing already-allocated rate tables.
    pub fn from_shared(rates: Arc<RateTables>) -> Self {
        Self { rates }
    }

    /// Returns the rate tables this engine prices against.
    pub fn rates(&self) -> &RateTables {
        &self.rates
    }

    /// Returns every validation problem for the invoice; empty means valid.
    pub fn validate(&self, invoice: &Invoice) -> Vec<String> {
        validate_invoice(Some(invoice))
    }

    /// Computes the payable total and the warnings, in the order raised.
    ///
    /// Fails with [`EngineError::InvalidInvoice`] when validation finds any
    /// problem; nothing is computed in that case. An amount that overflows
    /// `Decimal` is reported the same way.
    pub fn compute_total(&self, invoice: &Invoice) -> EngineResult<(Decimal, Vec<String>)> {
        let result = self.price(Some(invoice))?;
        let warnings = result.warning_messages();
        Ok((result.breakdown.total, warnings))
    }

    /// Prices an invoice, returning the full breakdown and audit trace.
    ///
    /// `None` stands for a missing invoice and is reported as invalid.
    pub fn price(&self, invoice: Option<&Invoice>) -> EngineResult<PricingResult> {
        let problems = validate_invoice(invoice);
        let invoice = match invoice {
            Some(invoice) if problems.is_empty() => invoice,
            _ => return Err(EngineError::invalid_invoice(&problems)),
        };

        let rates = self.rates.as_ref();
        let mut steps: Vec<AuditStep> = Vec::with_capacity(7);
        let mut warnings: Vec<AuditWarning> = Vec::new();
        let mut step_number: u32 = 1;

        let subtotal_result = calculate_subtotal(&invoice.items, step_number)?;
        let subtotal = subtotal_result.subtotal;
        let fragile_fee = subtotal_result.fragile_fee;
        steps.push(subtotal_result.audit_step);
        step_number += 1;

        let shipping_result = calculate_shipping(&invoice.country, subtotal, rates, step_number);
        let shipping = shipping_result.shipping;
        steps.push(shipping_result.audit_step);
        step_number += 1;

        let membership_result =
            calculate_membership_discount(&invoice.membership, subtotal, rates, step_number)?;
        let membership_discount = membership_result.discount;
        steps.push(membership_result.audit_step);
        step_number += 1;

        let coupon_result =
            apply_coupon(invoice.coupon.as_deref(), subtotal, rates, step_number)?;
        let coupon_discount = coupon_result.discount;
        warnings.extend(coupon_result.warning);
        steps.push(coupon_result.audit_step);
        step_number += 1;

        let total_discount = combine_discounts(membership_discount, coupon_discount)?;
        let taxable_amount = subtotal
            .checked_sub(total_discount)
            .ok_or_else(|| EngineError::amount_overflow("in taxable amount"))?;

        let tax_result = calculate_tax(&invoice.country, taxable_amount, rates, step_number)?;
        let tax = tax_result.tax;
        steps.push(tax_result.audit_step);
        step_number += 1;

        let total_result = assemble_total(
            TotalComponents {
                subtotal,
                shipping,
                fragile_fee,
                tax,
                total_discount,
            },
            step_number,
        )?;
        let total = total_result.total;
        steps.push(total_result.audit_step);
        step_number += 1;

        let advisory = check_membership_upgrade(&invoice.membership, subtotal, step_number);
        warnings.extend(advisory.warning);
        steps.push(advisory.audit_step);

        Ok(PricingResult {
            invoice_id: invoice.invoice_id.clone(),
            customer_id: invoice.customer_id.clone(),
            country: invoice.country.clone(),
            breakdown: PricingBreakdown {
                subtotal,
                fragile_fee,
                shipping,
                membership_discount,
                coupon_discount,
                total_discount,
                tax,
                total,
            },
            audit_trace: AuditTrace { steps, warnings },
        })
    }
}

impl Default for PricingEngine {
    /// An engine over the built-in rate tables.
    fn default() -> Self {
        Self::new(RateTables::default())
    }
}
