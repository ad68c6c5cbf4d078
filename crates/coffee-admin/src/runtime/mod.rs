//! # Runtime
//!
//! Starting and stopping the dashboard backend.
//!
//! [`DashboardSystem`] spawns one table task per table on the Tokio runtime,
//! injects the `order_items` table's reference-checking context, and builds the
//! services (composer, lifecycle, analytics, session, settings) on top of the
//! table clients. Shutting it down drops every client and waits for each table
//! to drain.
//!
//! Logging is set up separately, once per process, with
//! [`table_actor::telemetry::setup_tracing_with`] and the configured default
//! filter:
//!
//! ```bash
//! RUST_LOG=info cargo run      # lifecycle events
//! RUST_LOG=debug cargo run     # every request with its payload
//! ```

pub mod system;

pub use system::*;
