//! Application state for the Invoice Pricing Engine API.

use crate::config::ConfigLoader;
use crate::engine::PricingEngine;

/// Shared application state.
///
/// Holds the pricing engine; cloning is cheap because the engine shares its
/// rate tables behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    engine: PricingEngine,
}

impl AppState {
    /// Creates application state around an engine.
    pub fn new(engine: PricingEngine) -> Self {
        Self { engine }
    }

    /// Creates application state from loaded rate tables.
    pub fn from_config(config: ConfigLoader) -> Self {
        Self::new(PricingEngine::new(config.into_rates()))
    }

    /// Returns the pricing engine.
    pub fn engine(&self) -> &PricingEngine {
        &self.engine
    }
}
