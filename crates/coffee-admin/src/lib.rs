//! # Coffee Admin
//!
//! Backend of a coffee-shop admin dashboard: catalog, order entry and status
//! tracking, analytics, staff accounts and settings.
//!
//! ## Core Components
//!
//! - **[composer]**: builds an order in memory with exact decimal totals and
//!   persists it as a header plus a line batch, rolling the header back when the
//!   lines fail.
//! - **[order_lifecycle]**: moves orders through
//!   `pending → preparing → completed` (or `cancelled`) under a transition table.
//! - **[analytics]**: revenue, top products and the dashboard snapshot.
//! - **[settings]** and **[session]**: typed settings and the identity provider.
//!
//! ## Data Layer
//!
//! Every table is a [`table_actor::TableActor`]. The `*_table` modules hold the
//! row rules, [`clients`] the typed clients, [`model`] the row types, and
//! [`runtime::DashboardSystem`] wires it all together from a
//! [`config::DashboardConfig`].
//!
//! ## Testing
//!
//! See [`table_actor::mock`] for the mock table used to inject gateway failures.

pub mod analytics;
pub mod clients;
pub mod composer;
pub mod config;
pub mod model;
pub mod order_item_table;
pub mod order_lifecycle;
pub mod order_table;
pub mod product_table;
pub mod profile_table;
pub mod runtime;
pub mod session;
pub mod setting_table;
pub mod settings;
