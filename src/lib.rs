//! Invoice Pricing Engine
//!
//! This crate computes the payable total for a retail invoice from line item
//! charges, country shipping tiers, membership and coupon discounts, and
//! country tax rates. The pricing pipeline is pure; the [`api`] module is a
//! thin HTTP adapter over it.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;

pub use engine::PricingEngine;
