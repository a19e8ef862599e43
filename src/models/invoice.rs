//! Invoice and line item models.
//!
//! Invoices are input-only: the engine reads them and never mutates or
//! stores them. Fields are deliberately loose (signed quantities, raw
//! category strings) so that [`crate::calculation::validate_invoice`] can
//! report every problem instead of failing at deserialization.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The closed set of product categories an item may belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Printed or digital books.
    Book,
    /// Groceries and consumables.
    Food,
    /// Devices and accessories.
    Electronics,
    /// Anything else.
    Other,
}

impl Category {
    /// Returns the wire name of the category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Book => "book",
            Category::Food => "food",
            Category::Electronics => "electronics",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "book" => Ok(Category::Book),
            "food" => Ok(Category::Food),
            "electronics" => Ok(Category::Electronics),
            "other" => Ok(Category::Other),
            _ => Err(()),
        }
    }
}

/// A single priced line on an invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Stock keeping unit; must be non-empty.
    pub sku: String,
    /// Raw category name; must parse as a [`Category`].
    pub category: String,
    /// Price per unit; must not be negative.
    pub unit_price: Decimal,
    /// Number of units; must be positive.
    pub qty: i64,
    /// Fragile items carry a per-unit handling fee.
    #[serde(default)]
    pub fragile: bool,
}

impl LineItem {
    /// Parses the item's category, returning `None` for names outside the closed set.
    ///
    /// # Examples
    ///
    /// ```
    /// use invoice_engine::models::{Category, LineItem};
    /// use rust_decimal::Decimal;
    ///
    /// let item = LineItem {
    ///     sku: "BK-1".to_string(),
    ///     category: "book".to_string(),
    ///     unit_price: Decimal::new(100, 0),
    ///     qty: 1,
    ///     fragile: false,
    /// };
    /// assert_eq!(item.category(), Some(Category::Book));
    /// ```
    pub fn category(&self) -> Option<Category> {
        self.category.parse().ok()
    }

    /// Returns `unit_price * qty`, or `None` if the product overflows.
    pub fn line_total(&self) -> Option<Decimal> {
        self.unit_price.checked_mul(Decimal::from(self.qty))
    }
}

/// An invoice to be priced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    /// Invoice identifier; must be non-empty.
    pub invoice_id: String,
    /// Customer identifier; must be non-empty.
    pub customer_id: String,
    /// Country code used for tax and shipping lookups. Not validated.
    pub country: String,
    /// Membership tier name (e.g. "none", "gold", "platinum"). Not validated.
    pub membership: String,
    /// Optional coupon code; surrounding whitespace is ignored.
    #[serde(default)]
    pub coupon: Option<String>,
    /// The ordered line items.
    #[serde(default)]
    pub items: Vec<LineItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_category_parses_closed_set() {
        assert_eq!("book".parse::<Category>(), Ok(Category::Book));
        assert_eq!("food".parse::<Category>(), Ok(Category::Food));
        assert_eq!("electronics".parse::<Category>(), Ok(Category::Electronics));
        assert_eq!("other".parse::<Category>(), Ok(Category::Other));
    }

    #[test]
    fn test_category_rejects_unknown_and_wrong_case() {
        assert!("invalid".parse::<Category>().is_err());
        assert!("Book".parse::<Category>().is_err());
        assert!("".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_display_matches_wire_name() {
        assert_eq!(Category::Electronics.to_string(), "electronics");
        assert_eq!(
            serde_json::to_string(&Category::Food).unwrap(),
            "\"food\""
        );
    }

    #[test]
    fn test_line_total_multiplies_price_by_qty() {
        let item = LineItem {
            sku: "A".to_string(),
            category: "book".to_string(),
            unit_price: dec("19.99"),
            qty: 3,
            fragile: false,
        };
        assert_eq!(item.line_total(), Some(dec("59.97")));
    }

    #[test]
    fn test_line_total_overflow_is_none() {
        let item = LineItem {
            sku: "A".to_string(),
            category: "book".to_string(),
            unit_price: dec("10000000000000000000000"),
            qty: 10_000_000,
            fragile: false,
        };
        assert_eq!(item.line_total(), None);
    }

    #[test]
    fn test_deserialize_invoice_with_defaults() {
        let json = r#"{
            "invoice_id": "I-001",
            "customer_id": "C-001",
            "country": "TH",
            "membership": "none",
            "items": [
                { "sku": "A", "category": "book", "unit_price": "100.00", "qty": 2 }
            ]
        }"#;

        let invoice: Invoice = serde_json::from_str(json).unwrap();
        assert_eq!(invoice.invoice_id, "I-001");
        assert_eq!(invoice.coupon, None);
        assert_eq!(invoice.items.len(), 1);
        assert!(!invoice.items[0].fragile);
        assert_eq!(invoice.items[0].unit_price, dec("100"));
    }

    #[test]
    fn test_deserialize_keeps_unknown_category_and_negative_qty() {
        let json = r#"{
            "sku": "X", "category": "toys", "unit_price": 5, "qty": -2, "fragile": true
        }"#;

        let item: LineItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.category, "toys");
        assert_eq!(item.category(), None);
        assert_eq!(item.qty, -2);
        assert!(item.fragile);
    }
}
