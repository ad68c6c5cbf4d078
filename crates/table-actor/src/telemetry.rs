//! # Tracing Setup
//!
//! Structured logging for the tables and everything built on them.
//!
//! Table actors log under a `table` field rather than a module path, so the compact
//! format stays readable:
//!
//! - `INFO Inserted table="orders" id=order_1 size=1`
//! - `WARN Batch rejected table="order_items" id=order_item_3 error=...`
//!
//! Verbosity comes from `RUST_LOG` when it is set. Otherwise the caller's default
//! directive applies:
//!
//! - `RUST_LOG=info` - lifecycle events only (start, insert, update, shutdown)
//! - `RUST_LOG=debug` - every request with its payload
//! - `RUST_LOG=table_actor=debug,info` - request payloads for the tables only
use tracing_subscriber::EnvFilter;

/// Installs a compact global subscriber filtered by `RUST_LOG`, defaulting to
/// `info`.
pub fn setup_tracing() {
    setup_tracing_with("info");
}

/// Installs a compact global subscriber filtered by `RUST_LOG`, or by
/// `default_filter` when `RUST_LOG` is unset or invalid. Does nothing if a global
/// subscriber is already installed.
pub fn setup_tracing_with(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init();
}
