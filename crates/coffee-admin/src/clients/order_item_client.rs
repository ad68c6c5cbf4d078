//! # Order Item Client
//!
//! High-level API for the `order_items` table. Lines are only ever inserted in
//! batches, one batch per order.
use crate::clients::map_gateway_error;
use crate::model::{OrderId, OrderItem, OrderItemInsert};
use crate::order_item_table::OrderItemError;
use async_trait::async_trait;
use table_actor::{GatewayError, Query, TableAccess, TableClient};
use tracing::{debug, instrument};

/// Client for interacting with the OrderItem table.
#[derive(Clone)]
pub struct OrderItemClient {
    inner: TableClient<OrderItem>,
}

impl OrderItemClient {
    pub fn new(inner: TableClient<OrderItem>) -> Self {
        Self { inner }
    }

    /// Inserts every line or none of them.
    #[instrument(skip(self, rows), fields(count = rows.len()))]
    pub async fn insert_lines(
        &self,
        rows: Vec<OrderItemInsert>,
    ) -> Result<Vec<OrderItem>, OrderItemError> {
        debug!(?rows, "Sending request");
        self.inner.insert_batch(rows).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn lines_for(&self, order_id: OrderId) -> Result<Vec<OrderItem>, OrderItemError> {
        self.select(Query::all().filter(move |l: &OrderItem| l.order_id == order_id))
            .await
    }

    #[instrument(skip(self))]
    pub async fn list_all(&self) -> Result<Vec<OrderItem>, OrderItemError> {
        self.select(Query::all()).await
    }
}

#[async_trait]
impl TableAccess<OrderItem> for OrderItemClient {
    type Error = OrderItemError;

    fn inner(&self) -> &TableClient<OrderItem> {
        &self.inner
    }

    fn map_error(e: GatewayError) -> Self::Error {
        map_gateway_error(e, OrderItemError::NotFound, OrderItemError::Gateway)
    }
}
