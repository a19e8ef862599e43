//! Rate table types for invoice pricing.
//!
//! This module contains the strongly-typed rate tables that drive pricing.
//! They are deserialized from YAML configuration files or built from the
//! defaults in [`RateTables::default`], and are never mutated afterwards.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{EngineError, EngineResult};

/// Tax rates by country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRates {
    /// Rate applied to countries without an entry in `countries`.
    pub default_rate: Decimal,
    /// Map of country code to tax rate (e.g. "TH" -> 0.07).
    #[serde(default)]
    pub countries: HashMap<String, Decimal>,
}

/// One tier of a shipping table.
///
/// A tier applies when the subtotal is strictly below `below`. A tier with
/// no `below` is unbounded and always applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingTier {
    /// Exclusive upper bound on the subtotal; `None` means unbounded.
    #[serde(default)]
    pub below: Option<Decimal>,
    /// Flat shipping cost for this tier.
    pub cost: Decimal,
}

impl ShippingTier {
    /// Creates a bounded tier covering subtotals strictly below `below`.
    pub fn bounded(below: Decimal, cost: Decimal) -> Self {
        Self {
            below: Some(below),
            cost,
        }
    }

    /// Creates the unbounded sentinel tier.
    pub fn unbounded(cost: Decimal) -> Self {
        Self { below: None, cost }
    }

    /// Returns true if `subtotal` falls in this tier.
    pub fn applies_to(&self, subtotal: Decimal) -> bool {
        self.below.is_none_or(|threshold| subtotal < threshold)
    }
}

/// An ordered sequence of shipping tiers, ascending by threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShippingTable {
    tiers: Vec<ShippingTier>,
}

impl ShippingTable {
    /// Creates a shipping table, checking that it is well formed.
    ///
    /// `name` identifies the table in error messages. A table is rejected
    /// when it is empty, when its bounded thresholds are not strictly
    /// ascending, or when its final tier is not unbounded.
    ///
    /// # Example
    ///
    /// ```
    /// use invoice_engine::config::{ShippingTable, ShippingTier};
    /// use rust_decimal::Decimal;
    ///
    /// let table = ShippingTable::new(
    ///     "shipping.TH",
    ///     vec![
    ///         ShippingTier::bounded(Decimal::new(500, 0), Decimal::new(60, 0)),
    ///         ShippingTier::unbounded(Decimal::ZERO),
    ///     ],
    /// )?;
    /// assert_eq!(table.tiers().len(), 2);
    /// # Ok::<(), invoice_engine::error::EngineError>(())
    /// ```
    pub fn new(name: &str, tiers: Vec<ShippingTier>) -> EngineResult<Self> {
        let table = Self { tiers };
        table.check(name)?;
        Ok(table)
    }

    /// Returns the tiers in scan order.
    pub fn tiers(&self) -> &[ShippingTier] {
        &self.tiers
    }

    pub(crate) fn check(&self, name: &str) -> EngineResult<()> {
        let invalid = |message: String| EngineError::InvalidRateTable {
            table: name.to_string(),
            message,
        };

        let Some((last, bounded)) = self.tiers.split_last() else {
            return Err(invalid("table has no tiers".to_string()));
        };

        if last.below.is_some() {
            return Err(invalid("last tier must be unbounded".to_string()));
        }

        let mut previous: Option<Decimal> = None;
        for (index, tier) in bounded.iter().enumerate() {
            let Some(threshold) = tier.below else {
                return Err(invalid(format!(
                    "tier {} is unbounded but is not the last tier",
                    index + 1
                )));
            };
            if previous.is_some_and(|p| threshold <= p) {
                return Err(invalid(format!(
                    "tier {} threshold {} is not above the previous threshold",
                    index + 1,
                    threshold
                )));
            }
            previous = Some(threshold);
        }

        Ok(())
    }
}

/// Shipping tables by country with a fallback table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingRates {
    /// Table used for countries without an entry in `countries`.
    pub default: ShippingTable,
    /// Map of country code to shipping table.
    #[serde(default)]
    pub countries: HashMap<String, ShippingTable>,
}

/// Coupons configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct CouponsConfig {
    /// Map of coupon code to discount fraction.
    pub coupons: HashMap<String, Decimal>,
}

/// Memberships configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct MembershipsConfig {
    /// Map of membership tier to discount fraction.
    pub memberships: HashMap<String, Decimal>,
}

/// The complete set of rate tables used for pricing.
///
/// Lookups never fail: unknown countries fall back to the default tax rate
/// and the default shipping table, and unknown coupons or tiers yield `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RateTables {
    tax: TaxRates,
    coupons: HashMap<String, Decimal>,
    memberships: HashMap<String, Decimal>,
    shipping: ShippingRates,
}

impl RateTables {
    /// Creates rate tables from their component parts.
    ///
    /// Returns `InvalidRateTable` if any shipping table is malformed.
    pub fn new(
        tax: TaxRates,
        coupons: HashMap<String, Decimal>,
        memberships: HashMap<String, Decimal>,
        shipping: ShippingRates,
    ) -> EngineResult<Self> {
        shipping.default.check("shipping.default")?;
        for (country, table) in &shipping.countries {
            table.check(&format!("shipping.{}", country))?;
        }

        Ok(Self {
            tax,
            coupons,
            memberships,
            shipping,
        })
    }

    /// Returns the tax configuration.
    pub fn tax(&self) -> &TaxRates {
        &self.tax
    }

    /// Returns the tax rate for a country, or the default rate.
    pub fn tax_rate(&self, country: &str) -> Decimal {
        self.tax
            .countries
            .get(country)
            .copied()
            .unwrap_or(self.tax.default_rate)
    }

    /// Returns the discount fraction for a coupon code, if known.
    pub fn coupon_rate(&self, code: &str) -> Option<Decimal> {
        self.coupons.get(code).copied()
    }

    /// Returns the discount fraction for a membership tier, if known.
    pub fn membership_rate(&self, tier: &str) -> Option<Decimal> {
        self.memberships.get(tier).copied()
    }

    /// Returns the shipping table for a country, or the default table.
    pub fn shipping_table(&self, country: &str) -> &ShippingTable {
        self.shipping
            .countries
            .get(country)
            .unwrap_or(&self.shipping.default)
    }

    /// Returns true if the country has its own shipping table.
    pub fn has_shipping_table(&self, country: &str) -> bool {
        self.shipping.countries.contains_key(country)
    }
}

impl Default for RateTables {
    /// The built-in rate tables.
    fn default() -> Self {
        let pct = |n: i64| Decimal::new(n, 2);
        let amount = |n: i64| Decimal::new(n, 0);

        let tax = TaxRates {
            default_rate: pct(5),
            countries: HashMap::from([
                ("TH".to_string(), pct(7)),
                ("JP".to_string(), pct(10)),
                ("US".to_string(), pct(8)),
            ]),
        };

        let coupons = HashMap::from([
            ("WELCOME10".to_string(), pct(10)),
            ("VIP20".to_string(), pct(20)),
            ("STUDENT5".to_string(), pct(5)),
        ]);

        let memberships = HashMap::from([
            ("gold".to_string(), pct(3)),
            ("platinum".to_string(), pct(5)),
        ]);

        let table = |tiers: Vec<ShippingTier>| ShippingTable { tiers };
        let shipping = ShippingRates {
            default: table(vec![
                ShippingTier::bounded(amount(200), amount(0)),
                ShippingTier::unbounded(amount(25)),
            ]),
            countries: HashMap::from([
                (
                    "TH".to_string(),
                    table(vec![
                        ShippingTier::bounded(amount(500), amount(60)),
                        ShippingTier::unbounded(amount(0)),
                    ]),
                ),
                (
                    "JP".to_string(),
                    table(vec![
                        ShippingTier::bounded(amount(4000), amount(600)),
                        ShippingTier::unbounded(amount(0)),
                    ]),
                ),
                (
                    "US".to_string(),
                    table(vec![
                        ShippingTier::bounded(amount(100), amount(15)),
                        ShippingTier::bounded(amount(300), amount(8)),
                        ShippingTier::unbounded(amount(0)),
                    ]),
                ),
            ]),
        };

        Self {
            tax,
            coupons,
            memberships,
            shipping,
        }
    }
}
