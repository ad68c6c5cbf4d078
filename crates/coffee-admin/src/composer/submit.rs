//! Persisting a composition.
//!
//! Submission writes the order header, then the line batch. The two writes go to
//! different tables and share no transaction. When the batch fails the header is
//! deleted again (unless compensation is switched off), so an order and its lines
//! appear together or not at all as far as the data service allows.

use crate::clients::{OrderClient, OrderItemClient};
use crate::composer::{ComposeError, OrderComposition, OrderNumberGenerator};
use crate::model::{Order, OrderItem};
use crate::session::Identity;
use std::sync::Arc;
use table_actor::TableAccess;
use tracing::{error, info, instrument, warn};

/// An order and its lines as stored.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmittedOrder {
    pub order: Order,
    pub lines: Vec<OrderItem>,
}

/// Writes compositions to the `orders` and `order_items` tables.
///
/// # Example
///
/// ```rust,ignore
/// let submitter = OrderSubmitter::new(orders, lines, Arc::new(OrderNumberGenerator::default()));
/// let saved = submitter.submit(&cart, session.current_user().await.as_ref()).await?;
/// println!("{} saved with {} lines", saved.order.order_number, saved.lines.len());
/// ```
#[derive(Clone)]
pub struct OrderSubmitter {
    orders: OrderClient,
    lines: OrderItemClient,
    numbers: Arc<OrderNumberGenerator>,
    compensate: bool,
}

impl OrderSubmitter {
    pub fn new(orders: OrderClient, lines: OrderItemClient, numbers: Arc<OrderNumberGenerator>) -> Self {
        Self {
            orders,
            lines,
            numbers,
            compensate: true,
        }
    }

    /// Whether a header whose lines failed is deleted again. On by default.
    pub fn with_compensation(mut self, compensate: bool) -> Self {
        self.compensate = compensate;
        self
    }

    pub(crate) fn orders(&self) -> &OrderClient {
        &self.orders
    }

    pub(crate) fn lines(&self) -> &OrderItemClient {
        &self.lines
    }

    /// Persists `composition` as one order header plus one line per selection.
    ///
    /// An empty composition fails before any write. `identity` becomes the
    /// order's `created_by`.
    #[instrument(skip_all, fields(lines = composition.len(), total = %composition.compute_total()))]
    pub async fn submit(
        &self,
        composition: &OrderComposition,
        identity: Option<&Identity>,
    ) -> Result<SubmittedOrder, ComposeError> {
        let draft = composition.draft(self.numbers.next(), identity.map(|i| i.id))?;

        let order = self
            .orders
            .insert_order(draft.header.clone())
            .await
            .map_err(|e| {
                warn!(error = %e, "Order header rejected");
                ComposeError::OrderPersistenceFailed(e.to_string())
            })?;

        match self.lines.insert_lines(draft.lines_for(order.id)).await {
            Ok(lines) => {
                info!(order_id = %order.id, order_number = %order.order_number, "Order submitted");
                Ok(SubmittedOrder { order, lines })
            }
            Err(e) => Err(self.recover(order, e.to_string()).await),
        }
    }

    /// Deals with a header whose lines could not be saved.
    async fn recover(&self, order: Order, reason: String) -> ComposeError {
        warn!(order_id = %order.id, error = %reason, "Order lines rejected");
        if !self.compensate {
            return ComposeError::PartialCommit {
                order_id: order.id,
                order_number: order.order_number,
                reason,
            };
        }

        match self.orders.delete(order.id).await {
            Ok(()) => {
                info!(order_id = %order.id, "Order header rolled back");
                ComposeError::LinePersistenceFailed {
                    reason,
                    rolled_back: true,
                }
            }
            Err(rollback) => {
                error!(order_id = %order.id, error = %rollback, "Rollback failed, order left without lines");
                ComposeError::PartialCommit {
                    order_id: order.id,
                    order_number: order.order_number,
                    reason: format!("{reason}; rollback failed: {rollback}"),
                }
            }
        }
    }
}
