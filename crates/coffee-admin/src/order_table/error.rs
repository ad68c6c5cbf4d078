//! Error types for the Order table.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The requested order was not found.
    #[error("Order not found: {0}")]
    NotFound(String),

    #[error("Order number must not be empty")]
    EmptyOrderNumber,

    #[error("Order total must not be negative: {0}")]
    NegativeTotal(Decimal),

    /// The table could not be reached or dropped the request.
    #[error("Order gateway error: {0}")]
    Gateway(String),
}

impl From<String> for OrderError {
    fn from(msg: String) -> Self {
        OrderError::Gateway(msg)
    }
}
