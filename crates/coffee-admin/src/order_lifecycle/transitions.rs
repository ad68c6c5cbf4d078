//! The order status state machine.
//!
//! ```text
//! pending ──► preparing ──► completed
//!    │            │
//!    └────────────┴──► cancelled
//! ```

use crate::model::OrderStatus;
use serde::{Deserialize, Serialize};

/// How status writes are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionPolicy {
    /// Only transitions from the table below are written.
    #[default]
    Strict,
    /// Any status is written over any other, without reading first.
    Permissive,
}

/// Statuses reachable from `from` in one step.
pub fn allowed_targets(from: OrderStatus) -> &'static [OrderStatus] {
    match from {
        OrderStatus::Pending => &[OrderStatus::Preparing, OrderStatus::Cancelled],
        OrderStatus::Preparing => &[OrderStatus::Completed, OrderStatus::Cancelled],
        OrderStatus::Completed | OrderStatus::Cancelled => &[],
    }
}

pub fn is_allowed(from: OrderStatus, to: OrderStatus) -> bool {
    allowed_targets(from).contains(&to)
}

/// The next status on the happy path, if any.
pub fn next_status(from: OrderStatus) -> Option<OrderStatus> {
    match from {
        OrderStatus::Pending => Some(OrderStatus::Preparing),
        OrderStatus::Preparing => Some(OrderStatus::Completed),
        OrderStatus::Completed | OrderStatus::Cancelled => None,
    }
}
