//! # Product Table
//!
//! The `products` table: the shop's catalog.
//!
//! ## Structure
//!
//! - [`entity`] - [`TableRow`](table_actor::TableRow) implementation for [`Product`]
//! - [`error`] - [`ProductError`] type for type-safe error handling
//! - [`new()`] - Factory function that creates the table and its client
//!
//! ## Usage
//!
//! ```rust
//! use coffee_admin::product_table;
//! use coffee_admin::model::ProductInsert;
//! use rust_decimal::Decimal;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, client) = product_table::new(32);
//!     tokio::spawn(actor.run(()));
//!
//!     let latte = client
//!         .create_product(ProductInsert::new("Latte", Decimal::new(450, 2)).with_stock(40))
//!         .await?;
//!     assert_eq!(latte.category, "coffee");
//!     Ok(())
//! }
//! ```

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::ProductClient;
use crate::model::Product;
use table_actor::TableActor;

/// Creates a new Product table and its client.
pub fn new(buffer_size: usize) -> (TableActor<Product>, ProductClient) {
    let (actor, generic_client) = TableActor::new(buffer_size);
    (actor, ProductClient::new(generic_client))
}
