/// One line of a persisted order.
///
/// # Table
/// Stored in the `order_items` table. Lines are written once, as a batch, right
/// after their order header, and are never edited: the unit price is a snapshot
/// of the catalog price at ordering time.
use crate::model::money::line_subtotal;
use crate::model::{OrderId, ProductId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for order lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OrderItemId(pub u32);

impl From<u32> for OrderItemId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for OrderItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "order_item_{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: OrderItemId,
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub subtotal: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Payload for inserting a line.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItemInsert {
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub subtotal: Decimal,
}

impl OrderItemInsert {
    /// Builds a line with its subtotal derived from `unit_price` and `quantity`.
    pub fn new(order_id: OrderId, product_id: ProductId, quantity: u32, unit_price: Decimal) -> Self {
        Self {
            order_id,
            product_id,
            quantity,
            unit_price,
            subtotal: line_subtotal(unit_price, quantity),
        }
    }
}
