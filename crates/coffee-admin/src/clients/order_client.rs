//! # Order Client
//!
//! High-level API for the `orders` table, including the joined
//! "orders with their lines and product names" read used by the order list and
//! the dashboard.
use crate::clients::{map_gateway_error, OrderItemClient, ProductClient};
use crate::model::{
    LineWithProduct, Order, OrderId, OrderInsert, OrderItem, OrderPatch, OrderStatus,
    OrderWithItems, Product, ProductId,
};
use crate::order_table::OrderError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};
use table_actor::{GatewayError, Query, TableAccess, TableClient};
use tracing::{debug, instrument};

/// Client for interacting with the Order table.
#[derive(Clone)]
pub struct OrderClient {
    inner: TableClient<Order>,
}

fn newest_first() -> Query<Order> {
    Query::all().order_by_desc(|o: &Order| (o.created_at, o.id))
}

impl OrderClient {
    pub fn new(inner: TableClient<Order>) -> Self {
        Self { inner }
    }

    /// Inserts an order header. The stored order is always `pending`.
    #[instrument(skip(self), fields(order_number = %row.order_number))]
    pub async fn insert_order(&self, row: OrderInsert) -> Result<Order, OrderError> {
        debug!("Sending request");
        self.inner.insert(row).await.map_err(Self::map_error)
    }

    /// Writes `status` without looking at the current one.
    #[instrument(skip(self))]
    pub async fn set_status(&self, id: OrderId, status: OrderStatus) -> Result<Order, OrderError> {
        debug!("Sending request");
        self.inner
            .update(id, OrderPatch::Status(status))
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn set_notes(&self, id: OrderId, notes: Option<String>) -> Result<Order, OrderError> {
        self.inner
            .update(id, OrderPatch::Notes(notes))
            .await
            .map_err(Self::map_error)
    }

    /// Orders newest first, optionally capped at `limit`.
    #[instrument(skip(self))]
    pub async fn list_recent(&self, limit: Option<usize>) -> Result<Vec<Order>, OrderError> {
        let query = match limit {
            Some(n) => newest_first().limit(n),
            None => newest_first(),
        };
        self.select(query).await
    }

    /// Orders created at or after `since`, newest first.
    #[instrument(skip(self))]
    pub async fn list_since(&self, since: DateTime<Utc>) -> Result<Vec<Order>, OrderError> {
        self.select(newest_first().filter(move |o: &Order| o.created_at >= since))
            .await
    }

    #[instrument(skip(self))]
    pub async fn list_by_status(&self, status: OrderStatus) -> Result<Vec<Order>, OrderError> {
        self.select(newest_first().filter(move |o: &Order| o.status == status))
            .await
    }

    /// Newest orders joined with their lines and each line's product name.
    ///
    /// Three reads: the orders, the lines of exactly those orders, and the
    /// products those lines reference.
    #[instrument(skip(self, lines, products))]
    pub async fn list_with_items(
        &self,
        lines: &OrderItemClient,
        products: &ProductClient,
        limit: Option<usize>,
    ) -> Result<Vec<OrderWithItems>, OrderError> {
        let orders = self.list_recent(limit).await?;
        let order_ids: HashSet<OrderId> = orders.iter().map(|o| o.id).collect();

        let order_lines = lines
            .select(Query::all().filter(move |l: &OrderItem| order_ids.contains(&l.order_id)))
            .await
            .map_err(|e| OrderError::Gateway(e.to_string()))?;

        let product_ids: HashSet<ProductId> = order_lines.iter().map(|l| l.product_id).collect();
        let names: HashMap<ProductId, String> = products
            .select(Query::all().filter(move |p: &Product| product_ids.contains(&p.id)))
            .await
            .map_err(|e| OrderError::Gateway(e.to_string()))?
            .into_iter()
            .map(|p| (p.id, p.name))
            .collect();

        let mut by_order: HashMap<OrderId, Vec<LineWithProduct>> = HashMap::new();
        for line in order_lines {
            let product_name = names.get(&line.product_id).cloned();
            by_order
                .entry(line.order_id)
                .or_default()
                .push(LineWithProduct { line, product_name });
        }

        debug!(orders = orders.len(), "Joined orders with lines");
        Ok(orders
            .into_iter()
            .map(|order| {
                let lines = by_order.remove(&order.id).unwrap_or_default();
                OrderWithItems { order, lines }
            })
            .collect())
    }
}

#[async_trait]
impl TableAccess<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &TableClient<Order> {
        &self.inner
    }

    fn map_error(e: GatewayError) -> Self::Error {
        map_gateway_error(e, OrderError::NotFound, OrderError::Gateway)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn header(number: &str) -> OrderInsert {
        OrderInsert {
            order_number: number.to_string(),
            customer_name: None,
            table_number: None,
            total_amount: Decimal::new(450, 2),
            payment_method: None,
            notes: None,
            created_by: None,
        }
    }

    #[tokio::test]
    async fn test_notes_can_be_set_and_cleared() {
        let (actor, orders) = crate::order_table::new(10);
        tokio::spawn(actor.run(()));
        let order = orders.insert_order(header("ORD1")).await.unwrap();

        let noted = orders
            .set_notes(order.id, Some("no sugar".to_string()))
            .await
            .unwrap();
        assert_eq!(noted.notes.as_deref(), Some("no sugar"));
        assert_eq!(noted.status, OrderStatus::Pending);
        assert_eq!(
            orders.get(order.id).await.unwrap().unwrap().notes.as_deref(),
            Some("no sugar")
        );

        let cleared = orders.set_notes(order.id, None).await.unwrap();
        assert_eq!(cleared.notes, None);
    }

    #[tokio::test]
    async fn test_notes_on_missing_order_is_not_found() {
        let (actor, orders) = crate::order_table::new(10);
        tokio::spawn(actor.run(()));

        let result = orders.set_notes(OrderId(7), Some("late".to_string())).await;
        assert_eq!(result.unwrap_err(), OrderError::NotFound("order_7".to_string()));
    }
}
