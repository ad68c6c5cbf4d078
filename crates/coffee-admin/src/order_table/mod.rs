//! # Order Table
//!
//! The `orders` table holds order headers. Lines live in the
//! [`order_item_table`](crate::order_item_table), which checks its foreign keys
//! against this table.
//!
//! - [`entity`] - [`TableRow`](table_actor::TableRow) implementation for [`Order`]
//! - [`error`] - [`OrderError`]
//! - [`new()`] - Factory function that creates the table and its client

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::OrderClient;
use crate::model::Order;
use table_actor::TableActor;

/// Creates a new Order table and its client.
pub fn new(buffer_size: usize) -> (TableActor<Order>, OrderClient) {
    let (actor, generic_client) = TableActor::new(buffer_size);
    (actor, OrderClient::new(generic_client))
}
