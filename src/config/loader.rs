//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading rate tables
//! from YAML files.

use std::fs;
use std::path::Path;
use tracing::info;

use crate::error::{EngineError, EngineResult};

use super::types::{CouponsConfig, MembershipsConfig, RateTables, ShippingRates, TaxRates};

/// Loads rate tables from a configuration directory.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── tax.yaml          # default_rate + per-country rates
/// ├── coupons.yaml      # coupon code -> discount fraction
/// ├── memberships.yaml  # membership tier -> discount fraction
/// └── shipping.yaml     # default table + per-country tier tables
/// ```
///
/// # Example
///
/// ```no_run
/// use invoice_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("TH tax: {}", loader.rates().tax_rate("TH"));
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    rates: RateTables,
}

impl ConfigLoader {
    /// Loads rate tables from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing (`ConfigNotFound`)
    /// - Any file contains invalid YAML or is missing a field (`ConfigParseError`)
    /// - A shipping table is malformed (`InvalidRateTable`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let tax = Self::load_yaml::<TaxRates>(&path.join("tax.yaml"))?;
        let coupons = Self::load_yaml::<CouponsConfig>(&path.join("coupons.yaml"))?;
        let memberships = Self::load_yaml::<MembershipsConfig>(&path.join("memberships.yaml"))?;
        let shipping = Self::load_yaml::<ShippingRates>(&path.join("shipping.yaml"))?;

        let shipping_countries = shipping.countries.len();
        let rates = RateTables::new(tax, coupons.coupons, memberships.memberships, shipping)?;

        info!(
            path = %path.display(),
            shipping_countries,
            "Loaded rate tables"
        );

        Ok(Self { rates })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the loaded rate tables.
    pub fn rates(&self) -> &RateTables {
        &self.rates
    }

    /// Consumes the loader, returning the rate tables.
    pub fn into_rates(self) -> RateTables {
        self.rates
    }
}
