//! Error types for status changes.

use crate::model::{OrderId, OrderStatus};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum LifecycleError {
    #[error("Order not found: {0}")]
    OrderNotFound(OrderId),

    /// Rejected before anything was written.
    #[error("Cannot move order from {from} to {to}")]
    IllegalTransition { from: OrderStatus, to: OrderStatus },

    /// `advance` on an order that is already completed or cancelled.
    #[error("Order is already {0}")]
    Terminal(OrderStatus),

    #[error("Failed to update order status: {0}")]
    UpdateFailed(String),
}
