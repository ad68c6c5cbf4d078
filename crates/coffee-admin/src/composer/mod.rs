//! # Order Composer
//!
//! Builds an order in memory and persists it.
//!
//! ## Structure
//!
//! - [`composition`] - [`OrderComposition`], the cart being assembled. No I/O.
//! - [`number`] - [`OrderNumberGenerator`] for `ORD…` order numbers
//! - [`submit`] - [`OrderSubmitter`], which writes the header and then the lines
//! - [`reconcile`] - finding orders that ended up without lines
//! - [`error`] - [`ComposeError`] and its [`ErrorKind`] classification
//!
//! ## Flow
//!
//! ```rust
//! use coffee_admin::composer::OrderComposition;
//! use coffee_admin::model::{PaymentMethod, Product, ProductId};
//! use chrono::Utc;
//! use rust_decimal::Decimal;
//!
//! let latte = Product {
//!     id: ProductId(1),
//!     name: "Latte".into(),
//!     description: None,
//!     price: Decimal::new(450, 2),
//!     image_url: None,
//!     category: "coffee".into(),
//!     stock: 10,
//!     is_active: true,
//!     created_at: Utc::now(),
//!     updated_at: Utc::now(),
//! };
//!
//! let mut cart = OrderComposition::new();
//! cart.add_item(&latte);
//! cart.add_item(&latte);
//! cart.set_payment_method(Some(PaymentMethod::Card));
//!
//! assert_eq!(cart.lines().len(), 1);
//! assert_eq!(cart.compute_total(), Decimal::new(900, 2));
//! ```
//!
//! Submission needs the `orders` and `order_items` clients; see [`OrderSubmitter`].

pub mod composition;
pub mod error;
pub mod number;
pub mod reconcile;
pub mod submit;

pub use composition::*;
pub use error::*;
pub use number::*;
pub use submit::*;
