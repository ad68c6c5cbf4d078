//! Finding orders that were saved without lines.
//!
//! With compensation on this only happens when the rollback itself failed; with
//! it off, whenever a line batch failed. Either way the sweep lists them for a
//! manual audit and changes nothing.

use crate::composer::{ComposeError, OrderSubmitter};
use crate::model::{Order, OrderId};
use std::collections::HashSet;
use tracing::{debug, info, instrument, warn};

impl OrderSubmitter {
    /// Orders that have no lines at all, newest first.
    ///
    /// Orders and lines are read in separate requests, so every candidate is
    /// looked up again before it is reported. A submission whose line batch
    /// is still in flight can still show up; treat the result as a hint for
    /// an audit, not as proof.
    #[instrument(skip(self))]
    pub async fn orphaned_orders(&self) -> Result<Vec<Order>, ComposeError> {
        let orders = self
            .orders()
            .list_recent(None)
            .await
            .map_err(|e| ComposeError::Lookup(e.to_string()))?;
        let with_lines: HashSet<OrderId> = self
            .lines()
            .list_all()
            .await
            .map_err(|e| ComposeError::Lookup(e.to_string()))?
            .into_iter()
            .map(|l| l.order_id)
            .collect();

        let mut orphans = Vec::new();
        for order in orders.into_iter().filter(|o| !with_lines.contains(&o.id)) {
            let lines = self
                .lines()
                .lines_for(order.id)
                .await
                .map_err(|e| ComposeError::Lookup(e.to_string()))?;
            if lines.is_empty() {
                orphans.push(order);
            } else {
                debug!(order_id = %order.id, "Lines arrived after the first read");
            }
        }

        if orphans.is_empty() {
            info!("No orphaned orders");
        } else {
            for order in &orphans {
                warn!(order_id = %order.id, order_number = %order.order_number, "Order has no lines");
            }
        }
        Ok(orphans)
    }
}
