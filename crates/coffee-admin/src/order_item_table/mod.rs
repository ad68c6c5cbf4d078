//! # Order Item Table
//!
//! The `order_items` table: immutable order lines.
//!
//! ## Dependencies
//!
//! Lines reference an order and a product. The table checks both references on
//! insert, so it needs clients for the `orders` and `products` tables. They are
//! passed to `run()` as a [`LineRefs`] context, which lets the tables be created
//! in any order and wired afterwards:
//!
//! ```rust
//! use coffee_admin::{order_item_table, order_table, product_table};
//! use coffee_admin::order_item_table::LineRefs;
//!
//! #[tokio::main]
//! async fn main() {
//!     let (order_actor, orders) = order_table::new(32);
//!     let (product_actor, products) = product_table::new(32);
//!     let (item_actor, _items) = order_item_table::new(32);
//!
//!     tokio::spawn(order_actor.run(()));
//!     tokio::spawn(product_actor.run(()));
//!     tokio::spawn(item_actor.run(LineRefs { orders, products }));
//! }
//! ```

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::{OrderClient, OrderItemClient, ProductClient};
use crate::model::OrderItem;
use table_actor::TableActor;

/// Clients the `order_items` table uses to check its foreign keys.
#[derive(Clone)]
pub struct LineRefs {
    pub orders: OrderClient,
    pub products: ProductClient,
}

/// Creates a new OrderItem table and its client.
pub fn new(buffer_size: usize) -> (TableActor<OrderItem>, OrderItemClient) {
    let (actor, generic_client) = TableActor::new(buffer_size);
    (actor, OrderItemClient::new(generic_client))
}
