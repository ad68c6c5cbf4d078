//! Error types for order composition and submission.

use crate::model::OrderId;
use thiserror::Error;

/// Coarse classification of a [`ComposeError`], for deciding how to react.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad input, caught before any write. The user fixes the cart and retries.
    Validation,
    /// The data service failed and nothing was left behind.
    Gateway,
    /// An order header exists without its lines and needs an audit.
    PartialCommit,
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ComposeError {
    #[error("Quantity must not be negative: {0}")]
    InvalidQuantity(i64),

    #[error("Cannot submit an order without items")]
    EmptyOrder,

    /// The header insert failed; no line was attempted.
    #[error("Failed to save order: {0}")]
    OrderPersistenceFailed(String),

    /// The line batch failed and the header was deleted again.
    #[error("Failed to save order items: {reason}")]
    LinePersistenceFailed { reason: String, rolled_back: bool },

    /// The header was saved but its lines were not, and it is still there.
    #[error("Order {order_number} ({order_id}) was saved without its items: {reason}")]
    PartialCommit {
        order_id: OrderId,
        order_number: String,
        reason: String,
    },

    /// A read needed for reconciliation failed.
    #[error("Failed to read orders: {0}")]
    Lookup(String),
}

impl ComposeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ComposeError::InvalidQuantity(_) | ComposeError::EmptyOrder => ErrorKind::Validation,
            ComposeError::OrderPersistenceFailed(_)
            | ComposeError::LinePersistenceFailed { .. }
            | ComposeError::Lookup(_) => ErrorKind::Gateway,
            ComposeError::PartialCommit { .. } => ErrorKind::PartialCommit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(ComposeError::EmptyOrder.kind(), ErrorKind::Validation);
        assert_eq!(ComposeError::InvalidQuantity(-1).kind(), ErrorKind::Validation);
        assert_eq!(
            ComposeError::OrderPersistenceFailed("down".into()).kind(),
            ErrorKind::Gateway
        );
        let orphan = ComposeError::PartialCommit {
            order_id: OrderId(7),
            order_number: "ORD1".into(),
            reason: "down".into(),
        };
        assert_eq!(orphan.kind(), ErrorKind::PartialCommit);
        assert_eq!(
            orphan.to_string(),
            "Order ORD1 (order_7) was saved without its items: down"
        );
    }
}
