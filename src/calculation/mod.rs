//! Calculation logic for the Invoice Pricing Engine.
//!
//! This module contains one function per pricing stage: invoice validation,
//! subtotal and fragile fee accumulation, shipping tier lookup, membership
//! discount, coupon discount, tax, total assembly, and the membership
//! upgrade advisory. Every stage except validation returns its value
//! together with an [`AuditStep`](crate::models::AuditStep).

mod advisory;
mod coupon_discount;
mod membership_discount;
mod shipping;
mod subtotal;
mod tax;
mod total;
mod validation;

pub use advisory::{
    PREMIUM_TIERS, UPGRADE_ADVISORY_THRESHOLD, UpgradeAdvisoryResult, check_membership_upgrade,
};
pub use coupon_discount::{CouponDiscountResult, apply_coupon};
pub use membership_discount::{
    BULK_DISCOUNT_AMOUNT, BULK_DISCOUNT_THRESHOLD, MembershipDiscountResult,
    calculate_membership_discount,
};
pub use shipping::{ShippingResult, calculate_shipping, shipping_cost};
pub use subtotal::{FRAGILE_FEE_PER_UNIT, SubtotalResult, calculate_subtotal};
pub use tax::{TaxResult, calculate_tax};
pub use total::{TotalComponents, TotalResult, assemble_total, combine_discounts};
pub use validation::validate_invoice;
