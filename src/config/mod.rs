//! Rate table configuration for the Invoice Pricing Engine.
//!
//! Rate tables can be built from the defaults ([`RateTables::default`]),
//! assembled in code ([`RateTables::new`]), or loaded from a directory of
//! YAML files with [`ConfigLoader`].
//!
//! # Example
//!
//! ```no_run
//! use invoice_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("US tax: {}", config.rates().tax_rate("US"));
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    CouponsConfig, MembershipsConfig, RateTables, ShippingRates, ShippingTable, ShippingTier,
    TaxRates,
};
