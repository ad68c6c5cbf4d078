//! TableRow trait implementation for the OrderItem domain type.

use crate::model::money::line_subtotal;
use crate::model::{OrderItem, OrderItemId, OrderItemInsert};
use crate::order_item_table::{LineRefs, OrderItemError};
use async_trait::async_trait;
use chrono::Utc;
use table_actor::{TableAccess, TableRow};
use tracing::debug;

#[async_trait]
impl TableRow for OrderItem {
    const TABLE: &'static str = "order_items";
    type Id = OrderItemId;
    type Insert = OrderItemInsert;
    type Patch = ();
    type Context = LineRefs;
    type Error = OrderItemError;

    fn from_insert(id: OrderItemId, row: OrderItemInsert) -> Result<Self, Self::Error> {
        if row.quantity == 0 {
            return Err(OrderItemError::ZeroQuantity);
        }
        let expected = line_subtotal(row.unit_price, row.quantity);
        if row.subtotal != expected {
            return Err(OrderItemError::SubtotalMismatch {
                expected,
                actual: row.subtotal,
            });
        }
        Ok(Self {
            id,
            order_id: row.order_id,
            product_id: row.product_id,
            quantity: row.quantity,
            unit_price: row.unit_price,
            subtotal: row.subtotal,
            created_at: Utc::now(),
        })
    }

    /// Checks that the referenced order and product exist.
    async fn on_insert(&mut self, ctx: &LineRefs) -> Result<(), Self::Error> {
        debug!(order_id = %self.order_id, product_id = %self.product_id, "Checking line references");

        let order = ctx
            .orders
            .get(self.order_id)
            .await
            .map_err(|e| OrderItemError::Gateway(e.to_string()))?;
        if order.is_none() {
            return Err(OrderItemError::UnknownOrder(self.order_id));
        }

        let product = ctx
            .products
            .get(self.product_id)
            .await
            .map_err(|e| OrderItemError::Gateway(e.to_string()))?;
        if product.is_none() {
            return Err(OrderItemError::UnknownProduct(self.product_id));
        }
        Ok(())
    }

    async fn on_update(&mut self, _patch: (), _ctx: &LineRefs) -> Result<(), Self::Error> {
        Err(OrderItemError::Immutable)
    }
}
