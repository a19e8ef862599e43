//! Error types for the Invoice Pricing Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! Pricing itself only ever fails with [`EngineError::InvalidInvoice`]; the
//! remaining variants come from loading rate tables.

use thiserror::Error;

/// The main error type for the Invoice Pricing Engine.
///
/// # Example
///
/// ```
/// use invoice_engine::error::EngineError;
///
/// let error = EngineError::invalid_invoice(&[
///     "Missing invoice_id".to_string(),
///     "Invalid qty for A".to_string(),
/// ]);
/// assert_eq!(
///     error.to_string(),
///     "Invalid invoice: Missing invoice_id; Invalid qty for A"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// The invoice failed validation. The message joins every problem with `"; "`.
    #[error("Invalid invoice: {message}")]
    InvalidInvoice {
        /// The concatenated problem list, in discovery order.
        message: String,
        /// The individual problems that make up `message`.
        problems: Vec<String>,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A rate table was parsed but is structurally unusable.
    #[error("Invalid rate table '{table}': {message}")]
    InvalidRateTable {
        /// The table that was rejected (e.g. "shipping.TH").
        table: String,
        /// Why the table was rejected.
        message: String,
    },
}

impl EngineError {
    /// Builds an [`EngineError::InvalidInvoice`] from a list of validation problems.
    pub fn invalid_invoice(problems: &[String]) -> Self {
        EngineError::InvalidInvoice {
            message: problems.join("; "),
            problems: problems.to_vec(),
        }
    }

    /// Builds an [`EngineError::InvalidInvoice`] for an amount that does not
    /// fit in a `Decimal`, e.g. `"Amount overflow for A"`.
    pub fn amount_overflow(context: impl std::fmt::Display) -> Self {
        Self::invalid_invoice(&[format!("Amount overflow {}", context)])
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
