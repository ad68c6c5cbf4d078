//! Error types for the Product table.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur during product operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    /// The requested product was not found.
    #[error("Product not found: {0}")]
    NotFound(String),

    /// Products need a non-blank name.
    #[error("Product name must not be empty")]
    EmptyName,

    /// Prices are never negative.
    #[error("Product price must not be negative: {0}")]
    NegativePrice(Decimal),

    /// The table could not be reached or dropped the request.
    #[error("Product gateway error: {0}")]
    Gateway(String),
}

impl From<String> for ProductError {
    fn from(msg: String) -> Self {
        ProductError::Gateway(msg)
    }
}
