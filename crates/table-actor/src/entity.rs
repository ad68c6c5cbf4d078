//! # TableRow Trait
//!
//! The `TableRow` trait is the contract every stored row type (Product, Order,
//! OrderItem, ...) implements to be managed by the generic [`TableActor`](crate::TableActor).
//! It names the table, fixes the id, insert and patch payload types, and provides
//! the validation hooks the actor calls around every write.
//!
//! # Provided Methods (Hooks)
//! - [`TableRow::on_insert`]
//! - [`TableRow::on_delete`]
//!
//! Both default to `Ok(())`. Only [`TableRow::on_update`] must be written, because
//! every table has its own idea of what a patch means (including "never").

use async_trait::async_trait;
use std::fmt::{Debug, Display};

/// Trait that any row type must implement to be stored in a [`TableActor`](crate::TableActor).
///
/// # Async & Context
/// Hooks are async so a row can consult other tables while it is being written
/// (foreign-key style checks). The `Context` associated type carries those
/// dependencies and is handed to `run()`, not `new()`, so tables can be created in
/// any order and wired afterwards.
#[async_trait]
pub trait TableRow: Clone + Send + Sync + 'static {
    /// Table name used in logs and error messages.
    const TABLE: &'static str;

    /// Row identifier. Generated by the table from a monotonically increasing `u32`;
    /// `Ord` keeps unordered selects in insertion order.
    type Id: Eq + Ord + Clone + Send + Sync + Display + Debug + From<u32>;

    /// Payload for inserting a new row.
    type Insert: Send + Sync + Debug;

    /// Payload for updating an existing row.
    type Patch: Send + Sync + Debug;

    /// Dependencies injected into every hook. Use `()` if none.
    type Context: Send + Sync;

    /// Per-table error type, wrapped by [`GatewayError::Rejected`](crate::GatewayError::Rejected)
    /// when a hook refuses a write.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Build the stored row from its generated id and the insert payload.
    /// Synchronous validation (required fields, ranges) belongs here.
    fn from_insert(id: Self::Id, row: Self::Insert) -> Result<Self, Self::Error>;

    /// Called after `from_insert`, before the row is stored.
    async fn on_insert(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Apply a patch. The actor calls this on a copy and only commits it on `Ok`.
    async fn on_update(&mut self, patch: Self::Patch, _ctx: &Self::Context)
        -> Result<(), Self::Error>;

    /// Called before the row is removed.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }
}
