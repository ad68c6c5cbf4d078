//! # Order Lifecycle
//!
//! Moves persisted orders through their statuses.
//!
//! - [`transitions`] - the transition table and [`TransitionPolicy`]
//! - [`error`] - [`LifecycleError`]
//!
//! Every change is a single update of the order row. Under
//! [`TransitionPolicy::Strict`] the order is read first and the write only
//! happens if the table allows it; writing the status the order already has is
//! accepted and writes nothing. Under [`TransitionPolicy::Permissive`] the update
//! is sent as-is.
//!
//! Nothing is cached: callers re-read the order list to see the new state.

pub mod error;
pub mod transitions;

pub use error::*;
pub use transitions::*;

use crate::clients::OrderClient;
use crate::model::{Order, OrderId, OrderStatus};
use crate::order_table::OrderError;
use table_actor::TableAccess;
use tracing::{debug, info, instrument, warn};

#[derive(Clone)]
pub struct OrderLifecycle {
    orders: OrderClient,
    policy: TransitionPolicy,
}

fn update_error(id: OrderId, e: OrderError) -> LifecycleError {
    match e {
        OrderError::NotFound(_) => LifecycleError::OrderNotFound(id),
        other => LifecycleError::UpdateFailed(other.to_string()),
    }
}

impl OrderLifecycle {
    pub fn new(orders: OrderClient, policy: TransitionPolicy) -> Self {
        Self { orders, policy }
    }

    pub fn policy(&self) -> TransitionPolicy {
        self.policy
    }

    async fn load(&self, id: OrderId) -> Result<Order, LifecycleError> {
        self.orders
            .get(id)
            .await
            .map_err(|e| update_error(id, e))?
            .ok_or(LifecycleError::OrderNotFound(id))
    }

    async fn write(&self, id: OrderId, status: OrderStatus) -> Result<Order, LifecycleError> {
        let order = self
            .orders
            .set_status(id, status)
            .await
            .map_err(|e| update_error(id, e))?;
        info!(order_id = %id, status = %status, "Order status changed");
        Ok(order)
    }

    /// Sets the status of order `id` to `status`, subject to the policy.
    #[instrument(skip(self), fields(policy = ?self.policy))]
    pub async fn set_status(&self, id: OrderId, status: OrderStatus) -> Result<Order, LifecycleError> {
        if self.policy == TransitionPolicy::Permissive {
            return self.write(id, status).await;
        }

        let order = self.load(id).await?;
        self.guarded_write(order, status).await
    }

    async fn guarded_write(&self, order: Order, to: OrderStatus) -> Result<Order, LifecycleError> {
        let from = order.status;
        if from == to {
            debug!(order_id = %order.id, status = %to, "Status unchanged");
            return Ok(order);
        }
        if !is_allowed(from, to) {
            warn!(order_id = %order.id, %from, %to, "Illegal transition");
            return Err(LifecycleError::IllegalTransition { from, to });
        }
        self.write(order.id, to).await
    }

    /// Moves the order one step along pending, preparing, completed.
    #[instrument(skip(self))]
    pub async fn advance(&self, id: OrderId) -> Result<Order, LifecycleError> {
        let order = self.load(id).await?;
        let to = next_status(order.status).ok_or(LifecycleError::Terminal(order.status))?;
        self.write(id, to).await
    }

    /// Cancels the order. Under the strict policy only open orders can be cancelled.
    #[instrument(skip(self))]
    pub async fn cancel(&self, id: OrderId) -> Result<Order, LifecycleError> {
        self.set_status(id, OrderStatus::Cancelled).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::OrderInsert;
    use rust_decimal::Decimal;
    use table_actor::mock::MockTable;
    use table_actor::GatewayError;

    fn stored(status: OrderStatus) -> Order {
        let now = chrono::Utc::now();
        Order {
            id: OrderId(1),
            order_number: "ORD1".into(),
            customer_name: None,
            table_number: None,
            total_amount: Decimal::ONE,
            status,
            payment_method: None,
            notes: None,
            created_by: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_strict_rejects_before_writing() {
        let mut mock = MockTable::<Order>::new();
        mock.expect_get().return_ok(Some(stored(OrderStatus::Completed)));

        let lifecycle = OrderLifecycle::new(OrderClient::new(mock.client()), TransitionPolicy::Strict);
        let result = lifecycle.set_status(OrderId(1), OrderStatus::Pending).await;

        assert_eq!(
            result,
            Err(LifecycleError::IllegalTransition {
                from: OrderStatus::Completed,
                to: OrderStatus::Pending,
            })
        );
        assert_eq!(mock.calls(), 1);
        mock.verify();
    }

    #[tokio::test]
    async fn test_same_status_is_a_no_op() {
        let mut mock = MockTable::<Order>::new();
        mock.expect_get().return_ok(Some(stored(OrderStatus::Preparing)));

        let lifecycle = OrderLifecycle::new(OrderClient::new(mock.client()), TransitionPolicy::Strict);
        let order = lifecycle
            .set_status(OrderId(1), OrderStatus::Preparing)
            .await
            .unwrap();

        assert_eq!(order.status, OrderStatus::Preparing);
        assert_eq!(mock.calls(), 1);
        mock.verify();
    }

    #[tokio::test]
    async fn test_permissive_sends_a_single_update() {
        let mut mock = MockTable::<Order>::new();
        mock.expect_update().return_ok(stored(OrderStatus::Pending));

        let lifecycle = OrderLifecycle::new(OrderClient::new(mock.client()), TransitionPolicy::Permissive);
        let order = lifecycle.set_status(OrderId(1), OrderStatus::Pending).await.unwrap();

        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(mock.calls(), 1);
        mock.verify();
    }

    #[tokio::test]
    async fn test_gateway_failure_surfaces_as_update_failed() {
        let mut mock = MockTable::<Order>::new();
        mock.expect_update().return_err(GatewayError::TableClosed);

        let lifecycle = OrderLifecycle::new(OrderClient::new(mock.client()), TransitionPolicy::Permissive);
        let result = lifecycle.set_status(OrderId(1), OrderStatus::Completed).await;

        assert!(matches!(result, Err(LifecycleError::UpdateFailed(reason)) if reason.contains("Table closed")));
        mock.verify();
    }

    #[tokio::test]
    async fn test_advance_walks_the_happy_path() {
        let (actor, orders) = crate::order_table::new(10);
        tokio::spawn(actor.run(()));
        let order = orders
            .insert_order(OrderInsert {
                order_number: "ORD1".into(),
                customer_name: None,
                table_number: None,
                total_amount: Decimal::ONE,
                payment_method: None,
                notes: None,
                created_by: None,
            })
            .await
            .unwrap();

        let lifecycle = OrderLifecycle::new(orders, TransitionPolicy::Strict);
        assert_eq!(lifecycle.advance(order.id).await.unwrap().status, OrderStatus::Preparing);
        assert_eq!(lifecycle.advance(order.id).await.unwrap().status, OrderStatus::Completed);
        assert_eq!(
            lifecycle.advance(order.id).await,
            Err(LifecycleError::Terminal(OrderStatus::Completed))
        );
        assert_eq!(
            lifecycle.cancel(order.id).await,
            Err(LifecycleError::IllegalTransition {
                from: OrderStatus::Completed,
                to: OrderStatus::Cancelled,
            })
        );
        assert_eq!(
            lifecycle.set_status(OrderId(99), OrderStatus::Preparing).await,
            Err(LifecycleError::OrderNotFound(OrderId(99)))
        );
    }
}
