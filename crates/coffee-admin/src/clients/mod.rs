//! Type-safe wrappers around [`TableClient`](table_actor::TableClient).
//!
//! Each client implements [`TableAccess`](table_actor::TableAccess) for the generic
//! reads and adds the queries its screens need.

pub mod order_client;
pub mod order_item_client;
pub mod product_client;
pub mod profile_client;
pub mod setting_client;

pub use order_client::*;
pub use order_item_client::*;
pub use product_client::*;
pub use profile_client::*;
pub use setting_client::*;

use table_actor::GatewayError;

/// Turns a gateway error into a table error.
///
/// A row's own validation error travels inside `GatewayError::Rejected`; it is
/// recovered as-is so callers can match on it.
pub(crate) fn map_gateway_error<E>(
    e: GatewayError,
    not_found: fn(String) -> E,
    gateway: fn(String) -> E,
) -> E
where
    E: std::error::Error + 'static,
{
    match e {
        GatewayError::NotFound(id) => not_found(id),
        GatewayError::Rejected(reason) => match reason.downcast::<E>() {
            Ok(own) => *own,
            Err(other) => gateway(other.to_string()),
        },
        other => gateway(other.to_string()),
    }
}
