//! Error types for the OrderItem table.

use crate::model::{OrderId, ProductId};
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur during order line operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderItemError {
    #[error("Order line not found: {0}")]
    NotFound(String),

    #[error("Order line quantity must be positive")]
    ZeroQuantity,

    /// The stored subtotal must be exactly `unit_price × quantity`.
    #[error("Order line subtotal {actual} does not match {expected}")]
    SubtotalMismatch { expected: Decimal, actual: Decimal },

    #[error("Order line references unknown order {0}")]
    UnknownOrder(OrderId),

    #[error("Order line references unknown product {0}")]
    UnknownProduct(ProductId),

    #[error("Order lines cannot be modified")]
    Immutable,

    #[error("Order line gateway error: {0}")]
    Gateway(String),
}

impl From<String> for OrderItemError {
    fn from(msg: String) -> Self {
        OrderItemError::Gateway(msg)
    }
}
