//! # Domain Model
//!
//! Row types for every table the dashboard touches, their insert and patch
//! payloads, and the exact-decimal money helpers shared by the composer and the
//! analytics screens.
//!
//! Ids are table-scoped newtypes over the gateway's `u32` sequence, so an
//! [`OrderId`] can never be passed where a [`ProductId`] is expected.

pub mod money;
pub mod order;
pub mod order_item;
pub mod product;
pub mod profile;
pub mod setting;

pub use order::*;
pub use order_item::*;
pub use product::*;
pub use profile::*;
pub use setting::*;

/// A string did not name a known variant of a lowercase enum.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value:?}")]
pub struct ParseVariantError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseVariantError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}
