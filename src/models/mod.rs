//! Core data models for the Invoice Pricing Engine.
//!
//! This module contains the invoice input types and the pricing output types.

mod invoice;
mod pricing_result;

pub use invoice::{Category, Invoice, LineItem};
pub use pricing_result::{
    AuditStep, AuditTrace, AuditWarning, MEMBERSHIP_UPGRADE_CODE, PricingBreakdown,
    PricingResult, UNKNOWN_COUPON_CODE,
};
