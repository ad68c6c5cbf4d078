//! TableRow trait implementation for the Order domain type.
//!
//! The table itself does not guard status transitions; that is the lifecycle
//! manager's job, and its permissive policy relies on the table accepting any
//! status write.

use crate::model::{Order, OrderId, OrderInsert, OrderPatch, OrderStatus};
use crate::order_table::OrderError;
use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use table_actor::TableRow;

#[async_trait]
impl TableRow for Order {
    const TABLE: &'static str = "orders";
    type Id = OrderId;
    type Insert = OrderInsert;
    type Patch = OrderPatch;
    type Context = ();
    type Error = OrderError;

    fn from_insert(id: OrderId, row: OrderInsert) -> Result<Self, Self::Error> {
        if row.order_number.trim().is_empty() {
            return Err(OrderError::EmptyOrderNumber);
        }
        if row.total_amount < Decimal::ZERO {
            return Err(OrderError::NegativeTotal(row.total_amount));
        }
        let now = Utc::now();
        Ok(Self {
            id,
            order_number: row.order_number,
            customer_name: row.customer_name,
            table_number: row.table_number,
            total_amount: row.total_amount,
            status: OrderStatus::Pending,
            payment_method: row.payment_method,
            notes: row.notes,
            created_by: row.created_by,
            created_at: now,
            updated_at: now,
        })
    }

    async fn on_update(&mut self, patch: OrderPatch, _ctx: &()) -> Result<(), Self::Error> {
        match patch {
            OrderPatch::Status(status) => self.status = status,
            OrderPatch::Notes(notes) => self.notes = notes,
        }
        self.updated_at = Utc::now();
        Ok(())
    }
}
